//! # Histogram Module
//!
//! Classifies the full-resolution image into thirteen color-distribution
//! buckets: six hue buckets, three saturation buckets, three value buckets
//! and one transparency bucket.
//!
//! ## How It Works
//! 1. One pass over the RGBA pixels builds raw counts, gated by opacity
//!    and (for the hue buckets) a saturation/value significance mask
//! 2. Each bucket group is rescaled so its total matches the pixel area -
//!    the hue partition admits fewer pixels than the value partition, and
//!    without the rescale sparse groups would be suppressed relative to
//!    the transparency bucket
//! 3. Everything is divided by a shared per-pixel divisor so counts stay
//!    comparable across image sizes
//!
//! All divisions truncate; boundary ties resolve through the inclusive/
//! exclusive boundary pattern of each bucket, never by rounding.
//!
//! The threshold constants changed across fingerprint revisions, so they
//! live in [`HistogramThresholds`] as a versioned configuration:
//! [`HistogramThresholds::default`] is the current set, `legacy()` matches
//! older stored fingerprints.

pub mod hsv;

use hsv::rgb_to_hsv;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// How the shared per-pixel divisor is derived from the image area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivisorKind {
    /// `area / 255` - current revision, buckets top out near 255
    AreaScaled,
    /// `sqrt(area)` - older stored fingerprints
    SqrtArea,
}

/// Versioned threshold set for the histogram
#[derive(Debug, Clone, Copy)]
pub struct HistogramThresholds {
    /// A pixel with alpha above this participates in color buckets
    pub opaque_alpha: u8,
    /// A pixel with alpha below this counts as transparent
    pub transparent_alpha: u8,
    /// Minimum saturation for the hue significance mask
    pub sat_min: u8,
    /// Minimum value for the hue significance mask
    pub val_min: u8,
    /// Divisor derivation
    pub divisor: DivisorKind,
}

impl Default for HistogramThresholds {
    fn default() -> Self {
        Self {
            opaque_alpha: 16,
            transparent_alpha: 127,
            sat_min: 36,
            val_min: 36,
            divisor: DivisorKind::AreaScaled,
        }
    }
}

impl HistogramThresholds {
    /// Threshold set matching fingerprints stored by older revisions
    pub fn legacy() -> Self {
        Self {
            opaque_alpha: 127,
            transparent_alpha: 127,
            sat_min: 36,
            val_min: 36,
            divisor: DivisorKind::SqrtArea,
        }
    }
}

/// The thirteen normalized color-distribution buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorBuckets {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub yellow: u32,
    pub cyan: u32,
    pub fuchsia: u32,
    pub vivid: u32,
    pub neutral: u32,
    pub dull: u32,
    pub light: u32,
    pub medium: u32,
    pub dark: u32,
    pub alpha: u32,
}

/// Raw (pre-normalization) counts gathered in the pixel pass
#[derive(Debug, Default)]
struct RawCounts {
    hue: [u64; 6],
    saturation: [u64; 3],
    value: [u64; 3],
    transparent: u64,
    opaque: u64,
    significant: u64,
}

/// Color-distribution histogram over the full-resolution image
#[derive(Debug, Default)]
pub struct ColorHistogram {
    thresholds: HistogramThresholds,
}

impl ColorHistogram {
    /// Create a histogram with the current threshold set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a histogram with an explicit threshold set
    pub fn with_thresholds(thresholds: HistogramThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify every pixel and return the normalized buckets.
    ///
    /// Zero-area images produce all-zero buckets; empty bucket groups are
    /// normalized with a guarded divisor instead of faulting.
    pub fn buckets(&self, image: &DynamicImage) -> ColorBuckets {
        let rgba = image.to_rgba8();
        let area = rgba.width() as u64 * rgba.height() as u64;
        let raw = self.count(&rgba);

        let divisor = match self.thresholds.divisor {
            DivisorKind::AreaScaled => (area / 255).max(1),
            DivisorKind::SqrtArea => ((area as f64).sqrt() as u64).max(1),
        };

        let hue = normalize_group(&raw.hue, area, divisor);
        let saturation = normalize_group(&raw.saturation, area, divisor);
        let value = normalize_group(&raw.value, area, divisor);

        ColorBuckets {
            red: hue[0],
            green: hue[1],
            blue: hue[2],
            yellow: hue[3],
            cyan: hue[4],
            fuchsia: hue[5],
            vivid: saturation[0],
            neutral: saturation[1],
            dull: saturation[2],
            light: value[0],
            medium: value[1],
            dark: value[2],
            alpha: (raw.transparent / divisor) as u32,
        }
    }

    /// Raw counts for one image; exposed to tests via the coverage checks
    fn count(&self, rgba: &image::RgbaImage) -> RawCounts {
        let t = &self.thresholds;
        let mut raw = RawCounts::default();

        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;

            if a < t.transparent_alpha {
                raw.transparent += 1;
            }
            if a <= t.opaque_alpha {
                continue;
            }
            raw.opaque += 1;

            let (h, s, v) = rgb_to_hsv(r, g, b);

            // Saturation partition over opaque pixels
            if s > 67 {
                raw.saturation[0] += 1;
            } else if s >= 34 {
                raw.saturation[1] += 1;
            } else {
                raw.saturation[2] += 1;
            }

            // Value partition over opaque pixels
            if v > 67 {
                raw.value[0] += 1;
            } else if v >= 33 {
                raw.value[1] += 1;
            } else {
                raw.value[2] += 1;
            }

            // Hue partition only over pixels with enough color to matter
            if s < t.sat_min || v < t.val_min {
                continue;
            }
            raw.significant += 1;

            // Boundary inclusivity is part of the fingerprint contract:
            // red is open on both ends, its neighbors close against it
            if h < 21 || h > 234 {
                raw.hue[0] += 1; // red
            } else if h <= 63 {
                raw.hue[3] += 1; // yellow
            } else if h < 106 {
                raw.hue[1] += 1; // green
            } else if h <= 149 {
                raw.hue[4] += 1; // cyan
            } else if h < 191 {
                raw.hue[2] += 1; // blue
            } else {
                raw.hue[5] += 1; // fuchsia
            }
        }

        raw
    }
}

/// Rescale a bucket group so its total matches the area, then divide by
/// the shared per-pixel divisor. Truncating at each step; an empty group
/// keeps a divisor of one rather than faulting.
fn normalize_group<const N: usize>(raw: &[u64; N], area: u64, divisor: u64) -> [u32; N] {
    let sum: u64 = raw.iter().sum();
    let scale = area / sum.max(1);
    let mut out = [0u32; N];
    for (slot, &count) in out.iter_mut().zip(raw.iter()) {
        *slot = (count * scale / divisor) as u32;
    }
    out
}
