//! RGB to HSV conversion on the 0-255 scale.
//!
//! Hue is encoded in 0-255 rather than degrees so the bucket boundaries
//! in the histogram stay byte-valued. Saturation and value are 0-255.

/// Convert one RGB pixel to (h, s, v), each channel 0-255.
///
/// Gray pixels (max == min) report hue 0 and saturation 0.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;

    if max == 0 {
        return (0, 0, 0);
    }

    let delta = (max - min) as f64;
    if delta == 0.0 {
        return (0, 0, v);
    }

    let s = (255 * (max - min) as u32 / max as u32) as u8;

    // Sextant arithmetic, normalized to [0, 1) then scaled to 0-255
    let (rf, gf, bf) = (r as f64, g as f64, b as f64);
    let hue6 = if max == r {
        (gf - bf) / delta
    } else if max == g {
        2.0 + (bf - rf) / delta
    } else {
        4.0 + (rf - gf) / delta
    };

    let mut hue = hue6 / 6.0;
    if hue < 0.0 {
        hue += 1.0;
    }

    ((hue * 255.0) as u8, s, v)
}
