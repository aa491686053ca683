//! File filtering logic for the scanner.

use super::ImageFormat;
use std::path::Path;

/// File name prefix of macOS AppleDouble metadata files
pub const RESERVED_PREFIX: &str = "._";

/// Filters files to determine if they are supported images
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFilter;

impl ImageFilter {
    pub fn new() -> Self {
        Self
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        if name.starts_with(RESERVED_PREFIX) {
            return false;
        }

        self.get_format(path).is_supported()
    }

    /// Get the image format for a path
    pub fn get_format(&self, path: &Path) -> ImageFormat {
        ImageFormat::from_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_includes_every_supported_extension() {
        let filter = ImageFilter::new();
        for name in [
            "a.png", "a.jpg", "a.jpeg", "a.gif", "a.bmp", "a.tiff", "a.heic", "a.heif",
        ] {
            assert!(filter.should_include(Path::new(name)), "{name}");
        }
    }

    #[test]
    fn filter_is_case_insensitive() {
        let filter = ImageFilter::new();
        assert!(filter.should_include(Path::new("/photos/image.JPEG")));
        assert!(filter.should_include(Path::new("/photos/IMG_1234.HEIC")));
    }

    #[test]
    fn filter_excludes_non_images() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/photos/document.pdf")));
        assert!(!filter.should_include(Path::new("/photos/video.mp4")));
        assert!(!filter.should_include(Path::new("/photos/image.webp")));
    }

    #[test]
    fn filter_excludes_appledouble_files() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/photos/._IMG_0001.jpg")));
        assert!(!filter.should_include(Path::new("._.png")));
    }

    #[test]
    fn filter_keeps_other_dot_files() {
        let filter = ImageFilter::new();
        assert!(filter.should_include(Path::new("/photos/.cover.jpg")));
    }

    #[test]
    fn filter_handles_no_extension() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/photos/no_extension")));
    }
}
