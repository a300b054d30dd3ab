//! # Photo Fingerprint
//!
//! Compact, comparable fingerprints for raster images: four independent
//! 64-bit perceptual hashes plus a color-distribution histogram, serialized
//! into one delimited record a cataloging application can store and compare
//! by Hamming distance.
//!
//! ## Architecture
//! The library is split into a core engine and a thin presentation layer:
//! - `core::hasher` - the four hash algorithms and the bit-packing primitive
//! - `core::histogram` - hue/saturation/value bucket classification
//! - `core::record` - the delimited fingerprint record codec
//! - `core::pipeline` - per-image orchestration
//! - `core::decode` - the external-collaborator boundary (file decode,
//!   EXIF orientation, resizing)
//! - `error` - typed failure taxonomy
//!
//! The `photo-fingerprint` binary layers a thin clap CLI over this surface.

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use crate::core::pipeline::{Fingerprint, Fingerprinter};
pub use crate::error::{FingerprintError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or host).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
