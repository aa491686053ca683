//! # Core Module
//!
//! The UI-agnostic duplicate detection engine.
//!
//! ## Modules
//! - `scanner` - Discovers candidate images in a directory tree
//! - `hasher` - Computes content fingerprints from normalized pixels
//! - `finder` - Batches files, reports progress, honors cancellation
//! - `grouper` - Reduces fingerprints to duplicate groups
//! - `deleter` - Removes duplicates according to a retention policy
//! - `control` - Progress and cancellation collaborators
//! - `worker` - Runs scans and deletions on background threads

pub mod control;
pub mod deleter;
pub mod finder;
pub mod grouper;
pub mod hasher;
pub mod scanner;
pub mod worker;

// Re-export commonly used types
pub use control::{CancellationSource, CancellationToken, NeverCancel, NoProgress, ProgressSink};
pub use deleter::{Deleter, DeletionReport, RemovalMode, RetentionPolicy};
pub use finder::{DuplicateFinder, FinderBuilder, ScanReport};
pub use grouper::DuplicateGroup;
pub use hasher::{Fingerprint, FingerprintHasher, HashOutcome};
pub use worker::{spawn_delete, spawn_scan, DeleteHandle, ScanHandle};
