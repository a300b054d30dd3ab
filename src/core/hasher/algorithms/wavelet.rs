//! Wavelet Hash (wHash) implementation.
//!
//! wHash works by:
//! 1. Resizing the grayscale image to a power-of-two square
//! 2. Running a full multi-level 2D Haar decomposition
//! 3. Zeroing the top-level approximation coefficient (the DC component,
//!    so the hash ignores overall brightness) and reconstructing
//! 4. Re-decomposing until the approximation band is 8x8
//! 5. Thresholding that band against its median
//!
//! The forward and inverse transforms share one orthonormal butterfly,
//! so the zero-then-reconstruct round trip is exact. Coefficients use the
//! Mallat quadrant layout: approximation in the top-left, detail bands in
//! the remaining quadrants at each level.

use super::super::bits::pack_bits;
use super::super::traits::{HashAlgorithm, HashKind, HashValue};
use super::{median, HASH_SIZE};
use crate::core::decode::resize::resize_to_grayscale;
use crate::error::HashError;
use image::DynamicImage;
use std::f64::consts::FRAC_1_SQRT_2;

/// Wavelet Hash (wHash) implementation
#[derive(Debug, Default)]
pub struct WaveletHasher;

impl WaveletHasher {
    /// Create a new wHash hasher
    pub fn new() -> Self {
        Self
    }

    /// Side length of the working square: the largest power of two not
    /// exceeding the shorter image side, but never below 8.
    fn scale_for(width: u32, height: u32) -> u32 {
        let min_side = width.min(height).max(1);
        let natural = 1u32 << (31 - min_side.leading_zeros());
        natural.max(HASH_SIZE)
    }
}

impl HashAlgorithm for WaveletHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<HashValue, HashError> {
        let scale = Self::scale_for(image.width(), image.height());
        let gray = resize_to_grayscale(image, scale, scale)?;

        let n = scale as usize;
        let mut coeffs: Vec<f64> = gray.as_raw().iter().map(|&p| p as f64 / 255.0).collect();

        // Full decomposition leaves a 1x1 approximation: the DC term
        let max_level = scale.trailing_zeros() as usize;
        haar_forward(&mut coeffs, n, max_level);
        coeffs[0] = 0.0;
        haar_inverse(&mut coeffs, n, max_level);

        // Decompose the denoised grid until the approximation band is 8x8
        let target_level = max_level - HASH_SIZE.trailing_zeros() as usize;
        haar_forward(&mut coeffs, n, target_level);

        let band_size = HASH_SIZE as usize;
        let mut band = Vec::with_capacity(band_size * band_size);
        for y in 0..band_size {
            band.extend_from_slice(&coeffs[y * n..y * n + band_size]);
        }

        let median = median(&band);
        let bits = pack_bits(band.iter().map(|&c| c > median));
        Ok(HashValue::new(bits, HashKind::Wavelet))
    }

    fn kind(&self) -> HashKind {
        HashKind::Wavelet
    }
}

/// One forward Haar level over the `size` x `size` band of a grid with
/// row stride `stride`: rows first, then columns. Averages land in the
/// first half of each lane, differences in the second.
fn forward_level(data: &mut [f64], stride: usize, size: usize) {
    let half = size / 2;
    let mut lane = vec![0.0; size];

    for y in 0..size {
        let row = &mut data[y * stride..y * stride + size];
        for i in 0..half {
            lane[i] = (row[2 * i] + row[2 * i + 1]) * FRAC_1_SQRT_2;
            lane[half + i] = (row[2 * i] - row[2 * i + 1]) * FRAC_1_SQRT_2;
        }
        row.copy_from_slice(&lane);
    }

    for x in 0..size {
        for i in 0..half {
            let a = data[(2 * i) * stride + x];
            let b = data[(2 * i + 1) * stride + x];
            lane[i] = (a + b) * FRAC_1_SQRT_2;
            lane[half + i] = (a - b) * FRAC_1_SQRT_2;
        }
        for (i, &v) in lane.iter().enumerate() {
            data[i * stride + x] = v;
        }
    }
}

/// Inverse of [`forward_level`]: columns first, then rows
fn inverse_level(data: &mut [f64], stride: usize, size: usize) {
    let half = size / 2;
    let mut lane = vec![0.0; size];

    for x in 0..size {
        for i in 0..half {
            let approx = data[i * stride + x];
            let detail = data[(half + i) * stride + x];
            lane[2 * i] = (approx + detail) * FRAC_1_SQRT_2;
            lane[2 * i + 1] = (approx - detail) * FRAC_1_SQRT_2;
        }
        for (i, &v) in lane.iter().enumerate() {
            data[i * stride + x] = v;
        }
    }

    for y in 0..size {
        let row = &mut data[y * stride..y * stride + size];
        for i in 0..half {
            lane[2 * i] = (row[i] + row[half + i]) * FRAC_1_SQRT_2;
            lane[2 * i + 1] = (row[i] - row[half + i]) * FRAC_1_SQRT_2;
        }
        row.copy_from_slice(&lane);
    }
}

/// Multi-level forward transform: each level halves the approximation band
fn haar_forward(data: &mut [f64], n: usize, levels: usize) {
    for level in 0..levels {
        forward_level(data, n, n >> level);
    }
}

/// Multi-level inverse transform, unwinding levels in reverse order
fn haar_inverse(data: &mut [f64], n: usize, levels: usize) {
    for level in (0..levels).rev() {
        inverse_level(data, n, n >> level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    fn textured_image(width: u32, height: u32, shift: u8) -> DynamicImage {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Luma([(((x * 7 + y * 13) % 180) as u8) + shift])
        });
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn scale_is_floor_power_of_two_of_min_side() {
        assert_eq!(WaveletHasher::scale_for(1000, 600), 512);
        assert_eq!(WaveletHasher::scale_for(600, 1000), 512);
        assert_eq!(WaveletHasher::scale_for(256, 300), 256);
        assert_eq!(WaveletHasher::scale_for(255, 300), 128);
    }

    #[test]
    fn scale_never_drops_below_eight() {
        assert_eq!(WaveletHasher::scale_for(3, 3), 8);
        assert_eq!(WaveletHasher::scale_for(1, 1), 8);
    }

    #[test]
    fn forward_then_inverse_is_identity() {
        let n = 16;
        let original: Vec<f64> = (0..n * n).map(|i| (i % 37) as f64 / 37.0).collect();
        let mut data = original.clone();

        haar_forward(&mut data, n, 4);
        haar_inverse(&mut data, n, 4);

        for (a, b) in original.iter().zip(data.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn constant_signal_concentrates_in_dc() {
        let n = 8;
        let mut data = vec![0.5; n * n];
        haar_forward(&mut data, n, 3);

        // Orthonormal transform of a constant: DC = c * n, details all zero
        assert!((data[0] - 0.5 * n as f64).abs() < 1e-9);
        for &coeff in &data[1..] {
            assert!(coeff.abs() < 1e-9);
        }
    }

    #[test]
    fn identical_images_produce_identical_hash() {
        let hasher = WaveletHasher::new();
        let image = textured_image(64, 64, 0);

        let hash1 = hasher.hash_image(&image).unwrap();
        let hash2 = hasher.hash_image(&image).unwrap();

        assert_eq!(hash1, hash2);
    }

    #[test]
    fn all_black_image_hashes_to_zero() {
        let hasher = WaveletHasher::new();
        let image = DynamicImage::ImageLuma8(ImageBuffer::from_fn(32, 32, |_, _| Luma([0u8])));
        assert_eq!(hasher.hash_image(&image).unwrap().bits(), 0);
    }

    #[test]
    fn brightness_shift_barely_moves_hash() {
        // Zeroing the DC coefficient removes the global brightness component
        let hasher = WaveletHasher::new();
        let hash1 = hasher.hash_image(&textured_image(64, 64, 0)).unwrap();
        let hash2 = hasher.hash_image(&textured_image(64, 64, 40)).unwrap();

        assert!(hash1.distance(&hash2) <= 2);
    }

    #[test]
    fn tiny_image_still_hashes() {
        // Forces the scale floor: 3x3 input works on an 8x8 grid at level 0
        let hasher = WaveletHasher::new();
        let image = textured_image(3, 3, 0);
        hasher.hash_image(&image).unwrap();
    }

    #[test]
    fn kind_returns_wavelet() {
        assert_eq!(WaveletHasher::new().kind(), HashKind::Wavelet);
    }
}
