//! # Record Module
//!
//! Encodes and parses the delimited fingerprint record the host
//! application stores:
//!
//! ```text
//! <frames>!<avg>?<wavelet>?<dhash>?<phash>!<red>?<green>?<blue>?<yellow>?
//! <cyan>?<fuchsia>?<vivid>?<neutral>?<dull>?<light>?<medium>?<dark>?<alpha>
//! ```
//!
//! `!` separates the three major sections, `?` separates fields within a
//! section. Every field is decimal and always present; zero-valued buckets
//! are emitted as `0`. Field order and count are a compatibility contract
//! with the host, so parsing splits on the outer delimiter first and
//! validates every field count before touching a digit.

use crate::core::hasher::{HashKind, HashValue};
use crate::core::histogram::ColorBuckets;
use crate::error::RecordError;
use serde::{Deserialize, Serialize};

/// Number of fields in the hash section
const HASH_FIELDS: usize = 4;
/// Number of fields in the color section
const COLOR_FIELDS: usize = 13;

/// One complete image fingerprint: frame count, four perceptual hashes
/// and the color-distribution buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintRecord {
    /// Number of animation frames (1 for still images)
    pub frames: u32,
    /// Average hash (aHash)
    pub average: HashValue,
    /// Wavelet hash (wHash)
    pub wavelet: HashValue,
    /// Difference hash (dHash)
    pub difference: HashValue,
    /// Frequency hash (pHash)
    pub frequency: HashValue,
    /// Normalized color buckets
    pub colors: ColorBuckets,
}

impl FingerprintRecord {
    /// Serialize to the delimited wire form
    pub fn encode(&self) -> String {
        let c = &self.colors;
        format!(
            "{}!{}?{}?{}?{}!{}?{}?{}?{}?{}?{}?{}?{}?{}?{}?{}?{}?{}",
            self.frames,
            self.average,
            self.wavelet,
            self.difference,
            self.frequency,
            c.red,
            c.green,
            c.blue,
            c.yellow,
            c.cyan,
            c.fuchsia,
            c.vivid,
            c.neutral,
            c.dull,
            c.light,
            c.medium,
            c.dark,
            c.alpha,
        )
    }

    /// Parse a record from its delimited wire form.
    ///
    /// Splits on `!` first and validates section and field counts before
    /// parsing any number, so a malformed record is rejected as a whole.
    pub fn parse(input: &str) -> Result<Self, RecordError> {
        let sections: Vec<&str> = input.split('!').collect();
        if sections.len() != 3 {
            return Err(RecordError::SectionCount {
                expected: 3,
                found: sections.len(),
            });
        }

        let frames = parse_field::<u32>("frames", sections[0])?;

        let hashes: Vec<&str> = sections[1].split('?').collect();
        if hashes.len() != HASH_FIELDS {
            return Err(RecordError::FieldCount {
                section: "hash",
                expected: HASH_FIELDS,
                found: hashes.len(),
            });
        }

        let colors: Vec<&str> = sections[2].split('?').collect();
        if colors.len() != COLOR_FIELDS {
            return Err(RecordError::FieldCount {
                section: "color",
                expected: COLOR_FIELDS,
                found: colors.len(),
            });
        }

        let mut buckets = [0u32; COLOR_FIELDS];
        for (slot, field) in buckets.iter_mut().zip(colors.iter()) {
            *slot = parse_field("color bucket", field)?;
        }

        Ok(Self {
            frames,
            average: HashValue::new(parse_field("average hash", hashes[0])?, HashKind::Average),
            wavelet: HashValue::new(parse_field("wavelet hash", hashes[1])?, HashKind::Wavelet),
            difference: HashValue::new(
                parse_field("difference hash", hashes[2])?,
                HashKind::Difference,
            ),
            frequency: HashValue::new(
                parse_field("frequency hash", hashes[3])?,
                HashKind::Frequency,
            ),
            colors: ColorBuckets {
                red: buckets[0],
                green: buckets[1],
                blue: buckets[2],
                yellow: buckets[3],
                cyan: buckets[4],
                fuchsia: buckets[5],
                vivid: buckets[6],
                neutral: buckets[7],
                dull: buckets[8],
                light: buckets[9],
                medium: buckets[10],
                dark: buckets[11],
                alpha: buckets[12],
            },
        })
    }
}

impl std::fmt::Display for FingerprintRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

fn parse_field<T: std::str::FromStr>(name: &str, field: &str) -> Result<T, RecordError>
where
    T::Err: std::fmt::Display,
{
    field.parse().map_err(|e: T::Err| RecordError::InvalidField {
        field: format!("{} ({:?})", name, field),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> FingerprintRecord {
        FingerprintRecord {
            frames: 3,
            average: HashValue::new(12345, HashKind::Average),
            wavelet: HashValue::new(u64::MAX, HashKind::Wavelet),
            difference: HashValue::new(0, HashKind::Difference),
            frequency: HashValue::new(987654321, HashKind::Frequency),
            colors: ColorBuckets {
                red: 10,
                green: 0,
                blue: 255,
                yellow: 1,
                cyan: 2,
                fuchsia: 3,
                vivid: 200,
                neutral: 30,
                dull: 25,
                light: 100,
                medium: 155,
                dark: 0,
                alpha: 42,
            },
        }
    }

    #[test]
    fn encode_uses_fixed_field_order() {
        let encoded = sample_record().encode();
        assert_eq!(
            encoded,
            "3!12345?18446744073709551615?0?987654321!10?0?255?1?2?3?200?30?25?100?155?0?42"
        );
    }

    #[test]
    fn zero_buckets_are_still_emitted() {
        let mut record = sample_record();
        record.colors = ColorBuckets::default();
        let encoded = record.encode();

        let color_section = encoded.split('!').nth(2).unwrap();
        assert_eq!(color_section, "0?0?0?0?0?0?0?0?0?0?0?0?0");
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let record = sample_record();
        let parsed = FingerprintRecord::parse(&record.encode()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn parse_rejects_wrong_section_count() {
        let result = FingerprintRecord::parse("1!2?3?4?5");
        assert!(matches!(
            result,
            Err(RecordError::SectionCount { found: 2, .. })
        ));
    }

    #[test]
    fn parse_rejects_short_hash_section() {
        let result = FingerprintRecord::parse("1!2?3?4!0?0?0?0?0?0?0?0?0?0?0?0?0");
        assert!(matches!(
            result,
            Err(RecordError::FieldCount {
                section: "hash",
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn parse_rejects_short_color_section() {
        let result = FingerprintRecord::parse("1!2?3?4?5!0?0?0");
        assert!(matches!(
            result,
            Err(RecordError::FieldCount {
                section: "color",
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn parse_rejects_non_numeric_field() {
        let result = FingerprintRecord::parse("1!abc?3?4?5!0?0?0?0?0?0?0?0?0?0?0?0?0");
        assert!(matches!(result, Err(RecordError::InvalidField { .. })));
    }

    #[test]
    fn display_matches_encode() {
        let record = sample_record();
        assert_eq!(record.to_string(), record.encode());
    }
}
