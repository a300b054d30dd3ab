//! # Pipeline Module
//!
//! Orchestrates one fingerprint computation: the four hashes and the
//! histogram all read the same immutable, orientation-corrected image and
//! have no data dependency on each other, so they fan out across the rayon
//! pool and join before the record is assembled. Every stage is a pure
//! function of the pixels, so the result is identical regardless of
//! execution order.
//!
//! The image context is owned by the call for its duration; nothing is
//! cached across invocations.

use crate::core::decode::{frame_count, FastDecoder};
use crate::core::hasher::{
    AverageHasher, DctStrategy, DifferenceHasher, FrequencyHasher, HashAlgorithm, Orientation,
    WaveletHasher,
};
use crate::core::histogram::{ColorHistogram, HistogramThresholds};
use crate::error::Result;
use image::DynamicImage;
use std::path::Path;

/// Re-exported aggregate type; one record per image
pub use crate::core::record::FingerprintRecord as Fingerprint;

/// Computes complete fingerprints for images
#[derive(Debug, Default)]
pub struct Fingerprinter {
    thresholds: HistogramThresholds,
    dct_strategy: DctStrategy,
}

impl Fingerprinter {
    /// Create a fingerprinter with the current threshold set and the
    /// default two-axis DCT strategy
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit histogram threshold set (for compatibility with
    /// fingerprints stored by older revisions)
    pub fn with_thresholds(mut self, thresholds: HistogramThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Use an explicit DCT strategy for the frequency hash
    pub fn with_dct_strategy(mut self, strategy: DctStrategy) -> Self {
        self.dct_strategy = strategy;
        self
    }

    /// Fingerprint an already-decoded, orientation-corrected image.
    ///
    /// `frames` is supplied by the caller (the animation-frame driver is
    /// outside this core); still images pass 1.
    pub fn fingerprint_image(&self, image: &DynamicImage, frames: u32) -> Result<Fingerprint> {
        let histogram = ColorHistogram::with_thresholds(self.thresholds);

        let ((average, wavelet), ((difference, frequency), colors)) = rayon::join(
            || {
                rayon::join(
                    || AverageHasher::new().hash_image(image),
                    || WaveletHasher::new().hash_image(image),
                )
            },
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || DifferenceHasher::new(Orientation::Horizontal).hash_image(image),
                            || {
                                FrequencyHasher::with_strategy(self.dct_strategy)
                                    .hash_image(image)
                            },
                        )
                    },
                    || histogram.buckets(image),
                )
            },
        );

        Ok(Fingerprint {
            frames,
            average: average?,
            wavelet: wavelet?,
            difference: difference?,
            frequency: frequency?,
            colors,
        })
    }

    /// Decode a file through the fast-decode boundary and fingerprint it
    pub fn fingerprint_file(&self, path: &Path) -> Result<Fingerprint> {
        let image = FastDecoder::decode_oriented(path)?;
        let frames = frame_count(path);
        tracing::debug!(
            "fingerprinting {} ({}x{}, {} frame(s))",
            path.display(),
            image.width(),
            image.height(),
            frames
        );
        self.fingerprint_image(&image, frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::histogram::ColorBuckets;
    use image::{ImageBuffer, Rgba};

    fn textured_image() -> DynamicImage {
        let img = ImageBuffer::from_fn(64, 48, |x, y| {
            Rgba([
                (x * 4) as u8,
                (y * 5) as u8,
                ((x + y) * 2) as u8,
                255u8,
            ])
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let fingerprinter = Fingerprinter::new();
        let image = textured_image();

        let first = fingerprinter.fingerprint_image(&image, 1).unwrap();
        let second = fingerprinter.fingerprint_image(&image, 1).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn frame_count_is_passed_through() {
        let fingerprinter = Fingerprinter::new();
        let record = fingerprinter
            .fingerprint_image(&textured_image(), 12)
            .unwrap();
        assert_eq!(record.frames, 12);
    }

    #[test]
    fn record_round_trips_through_wire_form() {
        let fingerprinter = Fingerprinter::new();
        let record = fingerprinter
            .fingerprint_image(&textured_image(), 1)
            .unwrap();

        let parsed = Fingerprint::parse(&record.encode()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn dct_strategy_changes_only_the_frequency_hash() {
        let image = textured_image();
        let default = Fingerprinter::new()
            .fingerprint_image(&image, 1)
            .unwrap();
        let simple = Fingerprinter::new()
            .with_dct_strategy(DctStrategy::SingleAxisMean)
            .fingerprint_image(&image, 1)
            .unwrap();

        assert_eq!(default.average, simple.average);
        assert_eq!(default.wavelet, simple.wavelet);
        assert_eq!(default.difference, simple.difference);
        assert_ne!(default.frequency, simple.frequency);
    }

    #[test]
    fn zero_area_image_yields_a_valid_zero_record() {
        // Degenerate input is handled locally as zero contribution, not
        // propagated as an error
        let fingerprinter = Fingerprinter::new();
        let empty = DynamicImage::ImageRgba8(ImageBuffer::new(0, 0));

        let record = fingerprinter.fingerprint_image(&empty, 1).unwrap();

        assert_eq!(record.average.bits(), 0);
        assert_eq!(record.wavelet.bits(), 0);
        assert_eq!(record.difference.bits(), 0);
        assert_eq!(record.frequency.bits(), 0);
        assert_eq!(record.colors, ColorBuckets::default());
        assert_eq!(Fingerprint::parse(&record.encode()).unwrap(), record);
    }

    #[test]
    fn missing_file_fails_whole_fingerprint() {
        let fingerprinter = Fingerprinter::new();
        let result = fingerprinter.fingerprint_file(Path::new("/nonexistent.png"));
        assert!(result.is_err());
    }
}
