//! Progress and cancellation collaborators.
//!
//! Scans and deletions take these as trait objects so that callers can plug
//! in a channel, a UI widget or nothing at all.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Receives scan progress as a fraction in `[0.0, 1.0]`.
pub trait ProgressSink {
    fn report(&self, value: f64);
}

/// Polled at cancellation checkpoints.
///
/// Cancellation is cooperative: it is observed before each batch while
/// scanning and before each file while deleting, never mid-decode.
pub trait CancellationSource {
    fn is_cancelled(&self) -> bool;
}

/// Discards progress reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _value: f64) {}
}

/// Never requests cancellation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancellationSource for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Shared cancellation flag.
///
/// Clones observe the same flag, so one clone can live in the UI while
/// another is handed to a worker thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Clear a previous request so the token can drive a new operation
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl CancellationSource for CancellationToken {
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }
}
