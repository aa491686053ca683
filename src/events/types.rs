//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by background scans and deletions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Scanning phase events
    Scan(ScanEvent),
    /// Deletion phase events
    Delete(DeleteEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events during a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Scanning has started
    Started { root: PathBuf },
    /// Fraction of discovered files processed so far
    Progress(ScanProgress),
    /// Scanning completed
    Completed {
        total_files: usize,
        duplicate_groups: usize,
        diagnostics: usize,
    },
}

/// Progress information during a scan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanProgress {
    /// `processed / total`, in `[0.0, 1.0]`
    pub fraction: f64,
}

/// Events during deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DeleteEvent {
    /// Deletion has started
    Started { planned: usize },
    /// Deletion completed (possibly stopped early)
    Completed {
        deleted: usize,
        failed: usize,
        cancelled: bool,
    },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// Pipeline completed successfully
    Completed { summary: PipelineSummary },
    /// Pipeline was cancelled
    Cancelled,
    /// Pipeline encountered a fatal error
    Error { message: String },
}

/// Phases of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Scanning,
    Deleting,
}

/// Summary of a completed scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Total candidate images discovered
    pub total_files: usize,
    /// Number of duplicate groups found
    pub duplicate_groups: usize,
    /// Total number of duplicate images (excluding originals)
    pub duplicate_count: usize,
    /// Number of files that could not be fingerprinted
    pub diagnostics: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Scanning => write!(f, "Scanning"),
            PipelinePhase::Deleting => write!(f, "Deleting"),
        }
    }
}
