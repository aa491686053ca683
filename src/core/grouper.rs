//! Groups fingerprinted paths into duplicate clusters.
//!
//! Grouping is exact: paths belong together only when their fingerprints
//! are equal. Groups keep the order in which their fingerprint was first
//! seen, and paths keep discovery order within a group.

use crate::core::hasher::Fingerprint;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A set of images with the same fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Fingerprint shared by every path
    pub fingerprint: Fingerprint,
    /// Paths in discovery order; the first is treated as the original
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    pub fn new(fingerprint: Fingerprint, paths: Vec<PathBuf>) -> Self {
        Self { fingerprint, paths }
    }

    /// The first-discovered path, kept by default when deleting
    pub fn original(&self) -> Option<&PathBuf> {
        self.paths.first()
    }

    /// Every path after the original
    pub fn duplicates(&self) -> &[PathBuf] {
        self.paths.get(1..).unwrap_or_default()
    }

    /// Number of duplicates (excluding the original)
    pub fn duplicate_count(&self) -> usize {
        self.duplicates().len()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Keep entries with two or more paths, in their given order.
pub fn aggregate<I>(entries: I) -> Vec<DuplicateGroup>
where
    I: IntoIterator<Item = (Fingerprint, Vec<PathBuf>)>,
{
    entries
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(fingerprint, paths)| DuplicateGroup::new(fingerprint, paths))
        .collect()
}
