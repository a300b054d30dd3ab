//! # Hasher Module
//!
//! Computes the four 64-bit perceptual hashes.
//!
//! ## Algorithms
//! - **aHash (Average Hash)** - brightness threshold over an 8x8 grid
//! - **dHash (Difference Hash)** - adjacent-pixel comparison, 9x8 grid
//! - **wHash (Wavelet Hash)** - Haar-denoised low-frequency threshold
//! - **pHash (Frequency Hash)** - DCT low-frequency median threshold
//!
//! ## How It Works
//! 1. Resize the grayscale image to the algorithm's grid (Lanczos3)
//! 2. Derive a 64-element boolean comparison mask
//! 3. Pack the mask into a u64 with the shared [`bits::pack_bits`] rule
//! 4. Compare hashes by Hamming distance
//!
//! All four algorithms read the same immutable image and share no state,
//! so they can run on worker threads without synchronization.

pub mod algorithms;
pub mod bits;
mod traits;

pub use algorithms::{
    AverageHasher, DctStrategy, DifferenceHasher, FrequencyHasher, Orientation, WaveletHasher,
    HASH_SIZE,
};
pub use traits::{HashAlgorithm, HashKind, HashValue};

/// Configuration builder for hashers
#[derive(Debug, Clone, Default)]
pub struct HasherConfig {
    /// Algorithm to build
    kind: HashKind,
    /// Comparison direction for the difference hash
    orientation: Orientation,
    /// DCT strategy for the frequency hash
    dct_strategy: DctStrategy,
}

impl HasherConfig {
    /// Create a configuration for the given algorithm with default options
    pub fn new(kind: HashKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Set the comparison direction (difference hash only)
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the DCT strategy (frequency hash only)
    pub fn dct_strategy(mut self, strategy: DctStrategy) -> Self {
        self.dct_strategy = strategy;
        self
    }

    /// Build the hasher
    pub fn build(self) -> Box<dyn HashAlgorithm> {
        match self.kind {
            HashKind::Average => Box::new(AverageHasher::new()),
            HashKind::Wavelet => Box::new(WaveletHasher::new()),
            HashKind::Difference => Box::new(DifferenceHasher::new(self.orientation)),
            HashKind::Frequency => Box::new(FrequencyHasher::with_strategy(self.dct_strategy)),
        }
    }
}

impl Default for HashKind {
    fn default() -> Self {
        HashKind::Difference
    }
}
