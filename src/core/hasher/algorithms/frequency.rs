//! Frequency Hash (pHash) implementation.
//!
//! pHash works by:
//! 1. Resizing the grayscale image to 32x32
//! 2. Applying a separable 2D DCT-II (unnormalized, scipy convention)
//! 3. Taking the top-left 8x8 low-frequency block, DC term included
//! 4. Thresholding the 64 coefficients against their median
//!
//! Concentrating on low frequencies makes the hash robust to scaling,
//! compression artifacts and fine-detail noise.
//!
//! A `Simple` strategy is kept for parity with historically stored
//! fingerprints: single-axis DCT, DC column excluded, mean threshold.
//! The two-axis/median form is the default.

use super::super::bits::pack_bits;
use super::super::traits::{HashAlgorithm, HashKind, HashValue};
use super::{median, HASH_SIZE};
use crate::core::decode::resize::resize_to_grayscale;
use crate::error::HashError;
use image::DynamicImage;
use std::f64::consts::PI;

/// Input side length for the DCT
const DCT_SIZE: u32 = 32;

/// Selectable DCT strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DctStrategy {
    /// 2D DCT, top-left 8x8 block, median threshold (default)
    #[default]
    TwoAxisMedian,
    /// Row-axis DCT only, columns 1..=8, mean threshold (historical)
    SingleAxisMean,
}

/// Frequency Hash (pHash) implementation
#[derive(Debug, Default)]
pub struct FrequencyHasher {
    strategy: DctStrategy,
}

impl FrequencyHasher {
    /// Create a new pHash hasher with the default two-axis strategy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hasher with an explicit DCT strategy
    pub fn with_strategy(strategy: DctStrategy) -> Self {
        Self { strategy }
    }
}

impl HashAlgorithm for FrequencyHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<HashValue, HashError> {
        let gray = resize_to_grayscale(image, DCT_SIZE, DCT_SIZE)?;
        let n = DCT_SIZE as usize;
        let pixels: Vec<f64> = gray.as_raw().iter().map(|&p| p as f64).collect();
        let block = HASH_SIZE as usize;

        let bits = match self.strategy {
            DctStrategy::TwoAxisMedian => {
                let mut dct = pixels;
                dct_rows(&mut dct, n);
                dct_columns(&mut dct, n);

                // Low-frequency block, DC included
                let mut low = Vec::with_capacity(block * block);
                for y in 0..block {
                    low.extend_from_slice(&dct[y * n..y * n + block]);
                }

                let median = median(&low);
                pack_bits(low.iter().map(|&c| c > median))
            }
            DctStrategy::SingleAxisMean => {
                let mut dct = pixels;
                dct_rows(&mut dct, n);

                // Skip the DC column, keep the next eight
                let mut low = Vec::with_capacity(block * block);
                for y in 0..block {
                    low.extend_from_slice(&dct[y * n + 1..y * n + 1 + block]);
                }

                let mean = low.iter().sum::<f64>() / low.len() as f64;
                pack_bits(low.iter().map(|&c| c > mean))
            }
        };

        Ok(HashValue::new(bits, HashKind::Frequency))
    }

    fn kind(&self) -> HashKind {
        HashKind::Frequency
    }
}

/// Unnormalized DCT-II of one lane: y[k] = 2 * sum x[i] * cos(pi*k*(2i+1)/2N)
fn dct_lane(input: &[f64], output: &mut [f64]) {
    let n = input.len();
    for (k, out) in output.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (i, &x) in input.iter().enumerate() {
            sum += x * (PI * k as f64 * (2 * i + 1) as f64 / (2 * n) as f64).cos();
        }
        *out = 2.0 * sum;
    }
}

/// Apply the 1D DCT along every row of an n x n grid
fn dct_rows(data: &mut [f64], n: usize) {
    let mut lane = vec![0.0; n];
    for y in 0..n {
        let row = &mut data[y * n..(y + 1) * n];
        dct_lane(row, &mut lane);
        row.copy_from_slice(&lane);
    }
}

/// Apply the 1D DCT along every column of an n x n grid
fn dct_columns(data: &mut [f64], n: usize) {
    let mut column = vec![0.0; n];
    let mut lane = vec![0.0; n];
    for x in 0..n {
        for y in 0..n {
            column[y] = data[y * n + x];
        }
        dct_lane(&column, &mut lane);
        for y in 0..n {
            data[y * n + x] = lane[y];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    fn textured_image(shift: u8) -> DynamicImage {
        let img = ImageBuffer::from_fn(64, 64, |x, y| {
            Luma([(((x * 11 + y * 5) % 190) as u8) + shift])
        });
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn dct_of_constant_lane_is_dc_only() {
        let input = vec![1.0; 8];
        let mut output = vec![0.0; 8];
        dct_lane(&input, &mut output);

        // DC = 2 * N for a unit constant; every other coefficient is zero
        assert!((output[0] - 16.0).abs() < 1e-9);
        for &coeff in &output[1..] {
            assert!(coeff.abs() < 1e-9);
        }
    }

    #[test]
    fn dct_matches_direct_evaluation() {
        let input = [3.0, 1.0, 4.0, 1.0];
        let mut output = [0.0; 4];
        dct_lane(&input, &mut output);

        for (k, &out) in output.iter().enumerate() {
            let expected: f64 = 2.0
                * input
                    .iter()
                    .enumerate()
                    .map(|(i, &x)| x * (PI * k as f64 * (2 * i + 1) as f64 / 8.0).cos())
                    .sum::<f64>();
            assert!((out - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn identical_images_produce_identical_hash() {
        let hasher = FrequencyHasher::new();
        let image = textured_image(0);

        let hash1 = hasher.hash_image(&image).unwrap();
        let hash2 = hasher.hash_image(&image).unwrap();

        assert_eq!(hash1, hash2);
    }

    #[test]
    fn strategies_disagree_on_textured_input() {
        let image = textured_image(0);
        let default = FrequencyHasher::new().hash_image(&image).unwrap();
        let simple = FrequencyHasher::with_strategy(DctStrategy::SingleAxisMean)
            .hash_image(&image)
            .unwrap();

        assert_ne!(default.bits(), simple.bits());
    }

    #[test]
    fn all_black_image_hashes_to_zero() {
        let hasher = FrequencyHasher::new();
        let image = DynamicImage::ImageLuma8(ImageBuffer::from_fn(32, 32, |_, _| Luma([0u8])));
        assert_eq!(hasher.hash_image(&image).unwrap().bits(), 0);
    }

    #[test]
    fn kind_returns_frequency() {
        assert_eq!(FrequencyHasher::new().kind(), HashKind::Frequency);
    }
}
