//! # Error Module
//!
//! Error types for the fingerprint engine.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Typed decode failures** - the caller decides whether to skip,
//!   retry with a more permissive decode path, or report the file
//!   as unreadable; this crate never retries

use std::path::PathBuf;
use thiserror::Error;

/// Top-level fingerprint engine error
#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),
}

/// Errors from the external image-decode boundary
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to open image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported image format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to decode image {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

/// Errors from hash computation
///
/// Degenerate images (zero area, uniform pixels) are NOT errors - every
/// hash algorithm produces a valid, if meaningless, value for them. A
/// `HashError` means the whole fingerprint operation failed; a partial or
/// short record is never produced.
#[derive(Error, Debug)]
pub enum HashError {
    /// A resize was requested with a zero target dimension
    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Resize failed: {reason}")]
    ResizeFailed { reason: String },
}

/// Errors from fingerprint record parsing
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Expected {expected} sections, found {found}")]
    SectionCount { expected: usize, found: usize },

    #[error("Expected {expected} fields in {section} section, found {found}")]
    FieldCount {
        section: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid numeric field {field:?}: {reason}")]
    InvalidField { field: String, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, FingerprintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_includes_path() {
        let error = DecodeError::Corrupt {
            path: PathBuf::from("/photos/broken.jpg"),
            reason: "invalid JPEG".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/broken.jpg"));
        assert!(message.contains("invalid JPEG"));
    }

    #[test]
    fn record_error_reports_counts() {
        let error = RecordError::SectionCount {
            expected: 3,
            found: 2,
        };
        let message = error.to_string();
        assert!(message.contains('3'));
        assert!(message.contains('2'));
    }

    #[test]
    fn hash_error_reports_dimensions() {
        let error = HashError::InvalidDimensions {
            width: 0,
            height: 42,
        };
        assert!(error.to_string().contains("0x42"));
    }
}
