//! # Duplicate Image Finder
//!
//! Finds groups of duplicate images under a directory tree and removes all
//! but one member of each group.
//!
//! ## How Duplicates Are Decided
//! Two images are duplicates when their decoded pixels, converted to RGB and
//! shrunk to fit within 100x100, are byte-identical. The original encodings
//! may differ (a PNG and a BMP of the same picture match).
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and plumbing for
//! presentation layers:
//! - `core` - Discovery, fingerprinting, scanning, grouping and deletion
//! - `events` - Event-driven progress reporting (GUI-ready)
//! - `error` - Error types for fatal and per-file failures

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{DuplicateFinderError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
/// The filter is read from `RUST_LOG`.
pub fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .map_err(|e| DuplicateFinderError::Internal(format!("failed to install tracing subscriber: {e}")))
}
