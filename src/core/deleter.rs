//! Removes duplicates according to a retention policy.
//!
//! Deletion is irreversible and not atomic: files removed before a failure
//! or a cancellation stay removed. Each file is handled on its own, so one
//! failure never stops the rest.

use crate::core::control::CancellationSource;
use crate::core::grouper::DuplicateGroup;
use crate::error::DeleteError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Which members of a group survive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RetentionPolicy {
    /// Keep the first path of each group, delete the rest
    #[default]
    KeepOriginal,
    /// Delete every path of each group
    DeleteAll,
}

impl RetentionPolicy {
    pub fn from_keep_original(keep_original: bool) -> Self {
        if keep_original {
            RetentionPolicy::KeepOriginal
        } else {
            RetentionPolicy::DeleteAll
        }
    }

    /// Paths of `group` this policy removes
    pub fn deletion_set<'a>(&self, group: &'a DuplicateGroup) -> &'a [PathBuf] {
        match self {
            RetentionPolicy::KeepOriginal => group.duplicates(),
            RetentionPolicy::DeleteAll => &group.paths,
        }
    }
}

/// How a file is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RemovalMode {
    /// Unlink the file
    #[default]
    Permanent,
    /// Move the file to the platform recycle bin
    Trash,
}

/// Result of a deletion run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletionReport {
    /// Paths actually removed, in processing order
    pub deleted: Vec<PathBuf>,
    /// One message per file that could not be removed
    pub diagnostics: Vec<String>,
    /// Whether a cancellation checkpoint stopped the run
    pub cancelled: bool,
}

/// Deletes duplicate images
#[derive(Debug, Clone, Copy, Default)]
pub struct Deleter {
    mode: RemovalMode,
}

impl Deleter {
    pub fn new(mode: RemovalMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> RemovalMode {
        self.mode
    }

    /// Number of files `policy` would remove from `groups`
    pub fn planned(groups: &[DuplicateGroup], policy: RetentionPolicy) -> usize {
        groups.iter().map(|g| policy.deletion_set(g).len()).sum()
    }

    /// Delete the files `policy` selects from each group.
    ///
    /// `cancel` is polled before every file. When it fires the current group
    /// is abandoned; later groups poll again before their first file.
    pub fn delete(
        &self,
        groups: &[DuplicateGroup],
        policy: RetentionPolicy,
        cancel: &dyn CancellationSource,
    ) -> DeletionReport {
        let mut report = DeletionReport::default();

        info!(
            groups = groups.len(),
            planned = Self::planned(groups, policy),
            ?policy,
            mode = ?self.mode,
            "deleting duplicates"
        );

        for group in groups {
            for path in policy.deletion_set(group) {
                if cancel.is_cancelled() {
                    report.cancelled = true;
                    break;
                }

                match self.remove(path) {
                    Ok(()) => {
                        debug!(path = %path.display(), "deleted");
                        report.deleted.push(path.clone());
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "deletion failed");
                        report.diagnostics.push(e.to_string());
                    }
                }
            }
        }

        info!(
            deleted = report.deleted.len(),
            failed = report.diagnostics.len(),
            cancelled = report.cancelled,
            "deletion finished"
        );

        report
    }

    fn remove(&self, path: &Path) -> Result<(), DeleteError> {
        match self.mode {
            RemovalMode::Permanent => fs::remove_file(path).map_err(|source| DeleteError::Remove {
                path: path.to_path_buf(),
                source,
            }),
            RemovalMode::Trash => trash::delete(path).map_err(|e| DeleteError::Trash {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::control::NeverCancel;
    use crate::core::hasher::Fingerprint;
    use std::cell::Cell;
    use tempfile::TempDir;

    struct CancelOnPoll {
        polls: Cell<usize>,
        from: usize,
    }

    impl CancellationSource for CancelOnPoll {
        fn is_cancelled(&self) -> bool {
            self.polls.set(self.polls.get() + 1);
            self.polls.get() >= self.from
        }
    }

    fn group_of(dir: &TempDir, names: &[&str]) -> DuplicateGroup {
        let paths = names
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                fs::write(&path, b"same pixels").unwrap();
                path
            })
            .collect();
        DuplicateGroup::new(Fingerprint::of_pixels(names.join(",").as_bytes()), paths)
    }

    #[test]
    fn keep_original_flag_maps_to_policy() {
        assert_eq!(RetentionPolicy::from_keep_original(true), RetentionPolicy::KeepOriginal);
        assert_eq!(RetentionPolicy::from_keep_original(false), RetentionPolicy::DeleteAll);
        assert_eq!(RetentionPolicy::default(), RetentionPolicy::KeepOriginal);
    }

    #[test]
    fn keep_original_spares_first_path() {
        let temp_dir = TempDir::new().unwrap();
        let group = group_of(&temp_dir, &["x.jpg", "y.jpg", "z.jpg"]);

        let report = Deleter::default().delete(&[group.clone()], RetentionPolicy::KeepOriginal, &NeverCancel);

        assert_eq!(report.deleted, group.paths[1..].to_vec());
        assert!(group.paths[0].exists());
        assert!(!group.paths[1].exists());
        assert!(!group.paths[2].exists());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn delete_all_removes_every_path() {
        let temp_dir = TempDir::new().unwrap();
        let group = group_of(&temp_dir, &["x.jpg", "y.jpg"]);

        let report = Deleter::default().delete(&[group.clone()], RetentionPolicy::DeleteAll, &NeverCancel);

        assert_eq!(report.deleted, group.paths);
        assert!(group.paths.iter().all(|p| !p.exists()));
    }

    #[test]
    fn failures_are_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let mut group = group_of(&temp_dir, &["a.png", "b.png", "d.png"]);
        let missing = temp_dir.path().join("c.png");
        group.paths.insert(2, missing.clone());

        let report = Deleter::default().delete(&[group.clone()], RetentionPolicy::KeepOriginal, &NeverCancel);

        assert_eq!(report.deleted, vec![group.paths[1].clone(), group.paths[3].clone()]);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].contains("c.png"));
        assert!(!report.cancelled);
    }

    #[test]
    fn cancellation_stops_before_the_next_file() {
        let temp_dir = TempDir::new().unwrap();
        let first = group_of(&temp_dir, &["a1.jpg", "a2.jpg", "a3.jpg"]);
        let second = group_of(&temp_dir, &["b1.jpg", "b2.jpg"]);
        // First poll passes, second poll cancels
        let cancel = CancelOnPoll {
            polls: Cell::new(0),
            from: 2,
        };

        let report = Deleter::default().delete(
            &[first.clone(), second.clone()],
            RetentionPolicy::KeepOriginal,
            &cancel,
        );

        assert!(report.cancelled);
        assert_eq!(report.deleted, vec![first.paths[1].clone()]);
        assert!(first.paths[2].exists());
        assert!(second.paths[1].exists());
    }

    #[test]
    fn planned_counts_deletion_sets() {
        let temp_dir = TempDir::new().unwrap();
        let groups = vec![
            group_of(&temp_dir, &["a1.jpg", "a2.jpg", "a3.jpg"]),
            group_of(&temp_dir, &["b1.jpg", "b2.jpg"]),
        ];

        assert_eq!(Deleter::planned(&groups, RetentionPolicy::KeepOriginal), 3);
        assert_eq!(Deleter::planned(&groups, RetentionPolicy::DeleteAll), 5);
    }

    #[test]
    fn default_mode_is_permanent() {
        assert_eq!(Deleter::default().mode(), RemovalMode::Permanent);
        assert_eq!(Deleter::new(RemovalMode::Trash).mode(), RemovalMode::Trash);
    }
}
