//! # photo-fingerprint CLI
//!
//! Command-line interface for the fingerprint engine.
//!
//! ## Usage
//! ```bash
//! photo-fingerprint hash photo.jpg
//! photo-fingerprint hash ~/Photos --recursive --output json
//! ```

mod cli;

use photo_fingerprint::Result;

fn main() -> Result<()> {
    cli::run()
}
