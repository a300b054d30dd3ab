//! Trait definitions for perceptual hashing.

use crate::error::HashError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Available hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashKind {
    /// Average Hash (aHash) - global brightness threshold
    Average,
    /// Wavelet Hash (wHash) - Haar-denoised low-frequency threshold
    Wavelet,
    /// Difference Hash (dHash) - adjacent-pixel gradient comparison
    Difference,
    /// Frequency Hash (pHash) - DCT low-frequency median threshold
    Frequency,
}

impl HashKind {
    /// Get a human-readable description of the algorithm
    pub fn description(&self) -> &'static str {
        match self {
            HashKind::Average => "Average Hash (aHash) - brightness relative to the grid mean",
            HashKind::Wavelet => "Wavelet Hash (wHash) - Haar wavelet low-frequency structure",
            HashKind::Difference => {
                "Difference Hash (dHash) - brightness gradients between neighbors"
            }
            HashKind::Frequency => "Frequency Hash (pHash) - DCT-based coarse structure",
        }
    }
}

impl std::fmt::Display for HashKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashKind::Average => write!(f, "aHash"),
            HashKind::Wavelet => write!(f, "wHash"),
            HashKind::Difference => write!(f, "dHash"),
            HashKind::Frequency => write!(f, "pHash"),
        }
    }
}

/// Trait for hash algorithm implementations
///
/// Every algorithm is a pure function of the input image: identical pixels
/// always yield an identical value, regardless of execution order.
pub trait HashAlgorithm: Send + Sync {
    /// Compute a hash from an already-decoded, orientation-corrected image
    fn hash_image(&self, image: &DynamicImage) -> Result<HashValue, HashError>;

    /// Get the algorithm kind
    fn kind(&self) -> HashKind;
}

/// A computed 64-bit perceptual hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashValue {
    /// The packed comparison mask
    bits: u64,
    /// The algorithm that produced this hash
    kind: HashKind,
}

impl HashValue {
    /// Create a new hash value
    pub fn new(bits: u64, kind: HashKind) -> Self {
        Self { bits, kind }
    }

    /// Get the raw packed bits
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Get the algorithm that produced this hash
    pub fn kind(&self) -> HashKind {
        self.kind
    }

    /// Compute the Hamming distance to another hash
    ///
    /// Returns the number of bits that differ between the two hashes.
    /// Lower distance = more similar images.
    pub fn distance(&self, other: &Self) -> u32 {
        (self.bits ^ other.bits).count_ones()
    }

    /// Get the hash as a hexadecimal string
    pub fn to_hex(&self) -> String {
        format!("{:016x}", self.bits)
    }

    /// Calculate similarity as a percentage (0-100)
    pub fn similarity(&self, other: &Self) -> f64 {
        (1.0 - (self.distance(other) as f64 / 64.0)) * 100.0
    }
}

impl std::fmt::Display for HashValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits)
    }
}
