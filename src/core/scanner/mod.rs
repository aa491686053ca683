//! # Scanner Module
//!
//! Discovers candidate image files in a directory tree.
//!
//! ## Supported Formats
//! - PNG (.png)
//! - JPEG (.jpg, .jpeg)
//! - GIF (.gif)
//! - BMP (.bmp)
//! - TIFF (.tiff)
//! - HEIC (.heic, .heif) - iPhone photos
//!
//! Files whose name starts with `._` are AppleDouble metadata shadows and
//! are never candidates, whatever their extension.
//!
//! ## Example
//! ```rust,ignore
//! use duplicate_image_finder::core::scanner::{ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let files = scanner.discover(Path::new("/Users/photos"))?;
//! ```

mod filter;
mod walker;

pub use filter::{ImageFilter, RESERVED_PREFIX};
pub use walker::{DiscoveryOrder, ScanConfig, WalkDirScanner};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
    Heic,
    Unknown,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "png" => ImageFormat::Png,
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "gif" => ImageFormat::Gif,
            "bmp" => ImageFormat::Bmp,
            "tiff" => ImageFormat::Tiff,
            "heic" | "heif" => ImageFormat::Heic,
            _ => ImageFormat::Unknown,
        }
    }

    /// Detect format from a path's extension
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(ImageFormat::from_extension)
            .unwrap_or(ImageFormat::Unknown)
    }

    /// Check if this format is supported
    pub fn is_supported(&self) -> bool {
        !matches!(self, ImageFormat::Unknown)
    }
}
