//! # Hasher Module
//!
//! Computes content fingerprints for images.
//!
//! ## How It Works
//! 1. Decode the image (see [`ImageDecoder`])
//! 2. Convert to 8-bit RGB if it is in any other color mode
//! 3. Shrink, preserving aspect ratio, until neither side exceeds
//!    [`MAX_DIMENSION`] pixels (smaller images are left alone)
//! 4. SHA-256 over the raw pixel buffer
//!
//! Equal fingerprints mean byte-identical normalized pixels. This is an
//! exact match after normalization, not a similarity measure: re-encodings
//! of the same picture match, while an edit of a single pixel that survives
//! the downsample does not.
//!
//! ## Example
//! ```rust,ignore
//! use duplicate_image_finder::core::hasher::{FingerprintHasher, HashOutcome};
//!
//! match FingerprintHasher::new().compute(&path) {
//!     HashOutcome::Hashed(fingerprint) => println!("{}", fingerprint.short_hex()),
//!     HashOutcome::Failed { error, .. } => eprintln!("{}", error),
//! }
//! ```

mod decode;

pub use decode::ImageDecoder;

use crate::error::HashError;
use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Largest width or height of the normalized pixel buffer
pub const MAX_DIMENSION: u32 = 100;

/// SHA-256 digest of a normalized pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Hash a raw pixel buffer
    pub fn of_pixels(pixels: &[u8]) -> Self {
        Self(Sha256::digest(pixels).into())
    }

    /// Get the digest as a lowercase hexadecimal string
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// First eight hex characters, for compact display
    pub fn short_hex(&self) -> String {
        self.to_hex()[..8].to_string()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Error parsing a [`Fingerprint`] from hex
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fingerprint {0:?}: expected 64 hex characters")]
pub struct ParseFingerprintError(String);

impl FromStr for Fingerprint {
    type Err = ParseFingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 64 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseFingerprintError(s.to_string()));
        }

        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| ParseFingerprintError(s.to_string()))?;
        }
        Ok(Self(bytes))
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.to_hex()
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = ParseFingerprintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Result of fingerprinting one file.
///
/// Failures are values, not errors: the scan records them and moves on.
#[derive(Debug)]
pub enum HashOutcome {
    Hashed(Fingerprint),
    Failed { path: PathBuf, error: HashError },
}

impl HashOutcome {
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        match self {
            HashOutcome::Hashed(fingerprint) => Some(*fingerprint),
            HashOutcome::Failed { .. } => None,
        }
    }

    /// Human-readable diagnostic for a failure: `error processing <name>: <cause>`
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            HashOutcome::Hashed(_) => None,
            HashOutcome::Failed { path, error } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_else(|| path.to_string_lossy());
                Some(format!("error processing {}: {}", name, error))
            }
        }
    }
}

/// Convert to RGB and shrink to fit within [`MAX_DIMENSION`] on both sides.
pub fn normalize(image: DynamicImage) -> RgbImage {
    let rgb = match image {
        DynamicImage::ImageRgb8(buffer) => buffer,
        other => other.to_rgb8(),
    };

    if rgb.width() <= MAX_DIMENSION && rgb.height() <= MAX_DIMENSION {
        return rgb;
    }

    DynamicImage::ImageRgb8(rgb)
        .thumbnail(MAX_DIMENSION, MAX_DIMENSION)
        .into_rgb8()
}

/// Computes [`Fingerprint`]s from image files
#[derive(Debug, Clone, Copy, Default)]
pub struct FingerprintHasher;

impl FingerprintHasher {
    pub fn new() -> Self {
        Self
    }

    /// Fingerprint one file. Never fails past this boundary.
    pub fn compute(&self, path: &Path) -> HashOutcome {
        match self.hash_file(path) {
            Ok(fingerprint) => HashOutcome::Hashed(fingerprint),
            Err(error) => HashOutcome::Failed {
                path: path.to_path_buf(),
                error,
            },
        }
    }

    /// Decode and fingerprint a file
    pub fn hash_file(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let image = ImageDecoder::decode(path)?;

        if image.width() == 0 || image.height() == 0 {
            return Err(HashError::EmptyImage {
                path: path.to_path_buf(),
            });
        }

        Ok(self.hash_image(image))
    }

    /// Fingerprint an already-decoded image
    pub fn hash_image(&self, image: DynamicImage) -> Fingerprint {
        Fingerprint::of_pixels(normalize(image).as_raw())
    }
}
