//! Directory walking implementation using walkdir.

use super::filter::ImageFilter;
use crate::error::ScanError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Order in which discovered files are returned.
///
/// The first path of every duplicate group is the one kept by
/// [`RetentionPolicy::KeepOriginal`](crate::core::deleter::RetentionPolicy),
/// so this decides which physical file survives deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoveryOrder {
    /// Depth-first, siblings sorted by file name. Stable across platforms.
    #[default]
    FileName,
    /// Whatever order the filesystem yields entries in.
    Traversal,
}

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
    /// Ordering of the returned paths
    pub order: DiscoveryOrder,
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            filter: ImageFilter::new(),
        }
    }

    /// Recursively collect candidate images under `root`.
    ///
    /// Entries that cannot be read are logged and skipped; only a missing
    /// root is an error.
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        if self.config.order == DiscoveryOrder::FileName {
            walker = walker.sort_by_file_name();
        }

        let mut files = Vec::new();
        let mut unreadable = 0usize;

        for entry_result in walker {
            match entry_result {
                Ok(entry) => {
                    if entry.file_type().is_dir() {
                        continue;
                    }

                    if self.filter.should_include(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    unreadable += 1;
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                }
            }
        }

        debug!(
            root = %root.display(),
            candidates = files.len(),
            unreadable,
            "discovery finished"
        );

        Ok(files)
    }
}
