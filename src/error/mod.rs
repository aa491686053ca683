//! # Error Module
//!
//! Error types for the duplicate image finder.
//!
//! ## Severity
//! - **Fatal** - [`ScanError`] aborts a scan before any hashing starts
//! - **Per-file** - [`HashError`] and [`DeleteError`] never stop an operation;
//!   they are rendered into diagnostic strings and the work continues
//! - **Internal** - anything unexpected at the driver level (a worker panic)

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DuplicateFinderError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors that abort a scan
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },
}

/// Errors that occur while fingerprinting a single image
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Unsupported image format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Failed to decode image {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Image is empty or corrupted: {path}")]
    EmptyImage { path: PathBuf },

    #[error("Failed to open image file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while removing a single file
#[derive(Error, Debug)]
pub enum DeleteError {
    #[error("Error deleting {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error moving {path} to trash: {reason}")]
    Trash { path: PathBuf, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DuplicateFinderError>;
