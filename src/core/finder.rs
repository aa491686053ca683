//! Scan orchestration: discovery, batched fingerprinting and grouping.

use crate::core::control::{CancellationSource, NeverCancel, NoProgress, ProgressSink};
use crate::core::grouper::{aggregate, DuplicateGroup};
use crate::core::hasher::{Fingerprint, FingerprintHasher, HashOutcome};
use crate::core::scanner::{DiscoveryOrder, ScanConfig, WalkDirScanner};
use crate::error::ScanError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Files fingerprinted between two cancellation checks
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Result of one scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    /// Duplicate groups, in the order their fingerprint was first seen.
    /// Always empty for a cancelled scan.
    pub groups: Vec<DuplicateGroup>,
    /// One message per file that could not be fingerprinted
    pub diagnostics: Vec<String>,
    /// Candidate images discovered under the root
    pub total_files: usize,
    /// Whether the scan stopped at a cancellation checkpoint
    pub cancelled: bool,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ScanReport {
    /// Total number of duplicate images (excluding originals)
    pub fn duplicate_count(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::duplicate_count).sum()
    }

    /// Pretty-printed JSON for scripting front ends
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Per-scan accumulator. Built fresh for every call to [`DuplicateFinder::scan`].
#[derive(Debug, Default)]
struct ScanState {
    index: HashMap<Fingerprint, usize>,
    entries: Vec<(Fingerprint, Vec<PathBuf>)>,
    diagnostics: Vec<String>,
}

impl ScanState {
    fn record(&mut self, path: &Path, outcome: HashOutcome) {
        match outcome {
            HashOutcome::Hashed(fingerprint) => match self.index.get(&fingerprint) {
                Some(&slot) => self.entries[slot].1.push(path.to_path_buf()),
                None => {
                    self.index.insert(fingerprint, self.entries.len());
                    self.entries.push((fingerprint, vec![path.to_path_buf()]));
                }
            },
            failed @ HashOutcome::Failed { .. } => {
                if let Some(diagnostic) = failed.diagnostic() {
                    warn!(path = %path.display(), "{}", diagnostic);
                    self.diagnostics.push(diagnostic);
                }
            }
        }
    }
}

/// Configuration for the finder
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Files per batch; cancellation is checked before each batch
    pub batch_size: usize,
    /// Fingerprint each batch on the rayon pool
    pub parallel: bool,
    /// Scanner configuration
    pub scan_config: ScanConfig,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel: false,
            scan_config: ScanConfig::default(),
        }
    }
}

/// Builder for finder configuration
pub struct FinderBuilder {
    config: FinderConfig,
}

impl FinderBuilder {
    pub fn new() -> Self {
        Self {
            config: FinderConfig::default(),
        }
    }

    /// Set the batch size (0 is treated as 1)
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    /// Fingerprint files of a batch in parallel
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Follow symbolic links while walking
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.config.scan_config.follow_symlinks = follow;
        self
    }

    /// Set the discovery order
    pub fn order(mut self, order: DiscoveryOrder) -> Self {
        self.config.scan_config.order = order;
        self
    }

    pub fn build(self) -> DuplicateFinder {
        DuplicateFinder {
            config: self.config,
            hasher: FingerprintHasher::new(),
        }
    }
}

impl Default for FinderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds groups of duplicate images under a directory.
///
/// The finder holds configuration only; every scan gets its own state, so
/// one instance can serve any number of scans, including concurrent ones.
#[derive(Debug, Clone)]
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: FingerprintHasher,
}

impl Default for DuplicateFinder {
    fn default() -> Self {
        FinderBuilder::new().build()
    }
}

impl DuplicateFinder {
    pub fn builder() -> FinderBuilder {
        FinderBuilder::new()
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Scan without progress reporting or cancellation
    pub fn scan_headless(&self, root: &Path) -> Result<ScanReport, ScanError> {
        self.scan(root, &NoProgress, &NeverCancel)
    }

    /// Scan `root` for duplicate images.
    ///
    /// A missing root fails before any hashing. Files that cannot be
    /// fingerprinted become diagnostics. Progress is reported after every
    /// file as `processed / total` and reaches 1.0 only when the scan runs
    /// to completion. If `cancel` fires at a batch boundary the scan stops
    /// and returns no groups.
    pub fn scan(
        &self,
        root: &Path,
        progress: &dyn ProgressSink,
        cancel: &dyn CancellationSource,
    ) -> Result<ScanReport, ScanError> {
        let start_time = Instant::now();

        let scanner = WalkDirScanner::new(self.config.scan_config.clone());
        let files = scanner.discover(root)?;
        let total_files = files.len();

        info!(root = %root.display(), total_files, "starting duplicate scan");

        if files.is_empty() {
            return Ok(ScanReport {
                duration_ms: start_time.elapsed().as_millis() as u64,
                ..Default::default()
            });
        }

        let mut state = ScanState::default();
        let mut processed = 0usize;

        for (batch_index, batch) in files.chunks(self.config.batch_size.max(1)).enumerate() {
            if cancel.is_cancelled() {
                info!(processed, total_files, "scan cancelled");
                return Ok(ScanReport {
                    groups: Vec::new(),
                    diagnostics: state.diagnostics,
                    total_files,
                    cancelled: true,
                    duration_ms: start_time.elapsed().as_millis() as u64,
                });
            }

            debug!(batch = batch_index, size = batch.len(), "fingerprinting batch");

            let mut record = |path: &PathBuf, outcome: HashOutcome| {
                state.record(path, outcome);
                processed += 1;
                progress.report(processed as f64 / total_files as f64);
            };

            if self.config.parallel {
                // Indexed collect keeps candidate order
                let outcomes: Vec<HashOutcome> = batch
                    .par_iter()
                    .map(|path| self.hasher.compute(path))
                    .collect();
                for (path, outcome) in batch.iter().zip(outcomes) {
                    record(path, outcome);
                }
            } else {
                for path in batch {
                    record(path, self.hasher.compute(path));
                }
            }
        }

        let groups = aggregate(state.entries);
        let duration_ms = start_time.elapsed().as_millis() as u64;

        info!(
            total_files,
            groups = groups.len(),
            diagnostics = state.diagnostics.len(),
            duration_ms,
            "scan complete"
        );

        Ok(ScanReport {
            groups,
            diagnostics: state.diagnostics,
            total_files,
            cancelled: false,
            duration_ms,
        })
    }
}
