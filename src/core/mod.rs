//! # Core Module
//!
//! The host-agnostic fingerprint computation engine.
//!
//! ## Modules
//! - `decode` - Decodes image files (the external-collaborator boundary)
//! - `hasher` - Computes the four 64-bit perceptual hashes
//! - `histogram` - Classifies pixels into color-distribution buckets
//! - `record` - Encodes/parses the delimited fingerprint record
//! - `pipeline` - Orchestrates one fingerprint computation per image

pub mod decode;
pub mod hasher;
pub mod histogram;
pub mod pipeline;
pub mod record;

// Re-export commonly used types
pub use hasher::{HashKind, HashValue};
pub use histogram::ColorBuckets;
pub use pipeline::{Fingerprint, Fingerprinter};
pub use record::FingerprintRecord;
