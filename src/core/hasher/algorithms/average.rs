//! Average Hash (aHash) implementation.
//!
//! aHash works by:
//! 1. Resizing the grayscale image to 8x8 (Lanczos3)
//! 2. Computing the mean brightness of all 64 pixels
//! 3. For each pixel: if brighter than the mean, set bit to 1, else 0
//!
//! Subtracting the global mean makes the hash stable under uniform
//! brightness shifts. Fastest of the four algorithms.

use super::super::bits::pack_bits;
use super::super::traits::{HashAlgorithm, HashKind, HashValue};
use super::HASH_SIZE;
use crate::core::decode::resize::resize_to_grayscale;
use crate::error::HashError;
use image::DynamicImage;

/// Average Hash (aHash) implementation
#[derive(Debug, Default)]
pub struct AverageHasher;

impl AverageHasher {
    /// Create a new aHash hasher
    pub fn new() -> Self {
        Self
    }
}

impl HashAlgorithm for AverageHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<HashValue, HashError> {
        let gray = resize_to_grayscale(image, HASH_SIZE, HASH_SIZE)?;
        let pixels = gray.as_raw();

        // Mean is kept in floating point: an all-equal grid must produce an
        // all-zero mask under the strict greater-than comparison
        let total: u64 = pixels.iter().map(|&p| p as u64).sum();
        let mean = total as f64 / pixels.len() as f64;

        let bits = pack_bits(pixels.iter().map(|&p| p as f64 > mean));
        Ok(HashValue::new(bits, HashKind::Average))
    }

    fn kind(&self) -> HashKind {
        HashKind::Average
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgb};

    fn create_solid_gray(level: u8) -> DynamicImage {
        let img = ImageBuffer::from_fn(8, 8, |_, _| Luma([level]));
        DynamicImage::ImageLuma8(img)
    }

    fn create_checkerboard() -> DynamicImage {
        let img = ImageBuffer::from_fn(8, 8, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([255u8, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn identical_images_produce_identical_hash() {
        let hasher = AverageHasher::new();
        let image = create_checkerboard();

        let hash1 = hasher.hash_image(&image).unwrap();
        let hash2 = hasher.hash_image(&image).unwrap();

        assert_eq!(hash1, hash2);
    }

    #[test]
    fn all_black_grid_hashes_to_zero() {
        // Every pixel equals the mean, so no pixel exceeds it
        let hasher = AverageHasher::new();
        let hash = hasher.hash_image(&create_solid_gray(0)).unwrap();
        assert_eq!(hash.bits(), 0);
    }

    #[test]
    fn uniform_grid_hashes_to_zero_at_any_level() {
        let hasher = AverageHasher::new();
        for level in [1, 128, 255] {
            let hash = hasher.hash_image(&create_solid_gray(level)).unwrap();
            assert_eq!(hash.bits(), 0, "level {}", level);
        }
    }

    #[test]
    fn brightness_shift_moves_hash_little() {
        let hasher = AverageHasher::new();
        let base = ImageBuffer::from_fn(64, 64, |x, y| Luma([((x * 3 + y * 2) % 200) as u8]));
        let shifted = ImageBuffer::from_fn(64, 64, |x, y| {
            Luma([(((x * 3 + y * 2) % 200) as u8).saturating_add(30)])
        });

        let hash1 = hasher
            .hash_image(&DynamicImage::ImageLuma8(base))
            .unwrap();
        let hash2 = hasher
            .hash_image(&DynamicImage::ImageLuma8(shifted))
            .unwrap();

        // The mean shifts with the pixels, so the mask barely changes
        assert!(hash1.distance(&hash2) <= 4);
    }

    #[test]
    fn kind_returns_average() {
        assert_eq!(AverageHasher::new().kind(), HashKind::Average);
    }
}
