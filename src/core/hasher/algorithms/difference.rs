//! Difference Hash (dHash) implementation.
//!
//! dHash works by:
//! 1. Resizing the grayscale image to 9x8 (one extra column)
//! 2. Comparing each pixel to its immediate left neighbor per row
//! 3. If the right pixel is brighter, set bit to 1, else 0
//!
//! This captures the gradient of brightness changes along each row. A
//! vertical variant resizes to 8x9 and compares each pixel to the one
//! above it; the horizontal form is the primary hash.

use super::super::bits::pack_bits;
use super::super::traits::{HashAlgorithm, HashKind, HashValue};
use super::HASH_SIZE;
use crate::core::decode::resize::resize_to_grayscale;
use crate::error::HashError;
use image::DynamicImage;

/// Comparison direction for the difference hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Compare each pixel to its left neighbor (primary)
    #[default]
    Horizontal,
    /// Compare each pixel to the one above it
    Vertical,
}

/// Difference Hash (dHash) implementation
#[derive(Debug, Default)]
pub struct DifferenceHasher {
    orientation: Orientation,
}

impl DifferenceHasher {
    /// Create a new dHash hasher with the given comparison direction
    pub fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }
}

impl HashAlgorithm for DifferenceHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<HashValue, HashError> {
        let bits = match self.orientation {
            Orientation::Horizontal => {
                let gray = resize_to_grayscale(image, HASH_SIZE + 1, HASH_SIZE)?;
                let mut mask = Vec::with_capacity((HASH_SIZE * HASH_SIZE) as usize);
                for y in 0..HASH_SIZE {
                    for x in 0..HASH_SIZE {
                        let left = gray.get_pixel(x, y)[0];
                        let right = gray.get_pixel(x + 1, y)[0];
                        mask.push(right > left);
                    }
                }
                pack_bits(mask)
            }
            Orientation::Vertical => {
                let gray = resize_to_grayscale(image, HASH_SIZE, HASH_SIZE + 1)?;
                let mut mask = Vec::with_capacity((HASH_SIZE * HASH_SIZE) as usize);
                for y in 0..HASH_SIZE {
                    for x in 0..HASH_SIZE {
                        let above = gray.get_pixel(x, y)[0];
                        let below = gray.get_pixel(x, y + 1)[0];
                        mask.push(below > above);
                    }
                }
                pack_bits(mask)
            }
        };

        Ok(HashValue::new(bits, HashKind::Difference))
    }

    fn kind(&self) -> HashKind {
        HashKind::Difference
    }
}
