//! The four perceptual hash algorithm implementations.

mod average;
mod difference;
mod frequency;
mod wavelet;

pub use average::AverageHasher;
pub use difference::{DifferenceHasher, Orientation};
pub use frequency::{DctStrategy, FrequencyHasher};
pub use wavelet::WaveletHasher;

/// Comparison grid side: every hash packs an 8x8 mask into 64 bits
pub const HASH_SIZE: u32 = 8;

/// Median of a coefficient band; even-length bands average the middle pair.
///
/// Shared by the wavelet and frequency thresholds.
pub(crate) fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_odd_band_is_middle_element() {
        assert_eq!(median(&[5.0, 1.0, 3.0]), 3.0);
    }

    #[test]
    fn median_of_even_band_averages_middle_pair() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }
}
