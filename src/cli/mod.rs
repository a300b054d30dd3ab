//! # CLI Module
//!
//! Command-line interface for the fingerprint engine.
//!
//! ## Usage
//! ```bash
//! # Fingerprint a single image
//! photo-fingerprint hash photo.jpg
//!
//! # Fingerprint a directory tree
//! photo-fingerprint hash ~/Photos --recursive
//!
//! # JSON output for scripting
//! photo-fingerprint hash ~/Photos --output json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use photo_fingerprint::core::histogram::HistogramThresholds;
use photo_fingerprint::core::pipeline::{Fingerprint, Fingerprinter};
use photo_fingerprint::error::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Photo Fingerprint - perceptual hashes and color buckets for cataloging
#[derive(Parser, Debug)]
#[command(name = "photo-fingerprint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute fingerprint records for images
    Hash {
        /// Image files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Recurse into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Output format
        #[arg(short, long, default_value = "plain")]
        output: OutputFormat,

        /// Use the legacy histogram thresholds (older stored fingerprints)
        #[arg(long)]
        legacy_thresholds: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One `path<TAB>record` line per image
    Plain,
    /// JSON array with the structured fingerprint per image
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    photo_fingerprint::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Hash {
            paths,
            recursive,
            output,
            legacy_thresholds,
        } => run_hash(paths, recursive, output, legacy_thresholds),
    }
}

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff",
];

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Expand files and directories into a sorted list of image paths
fn collect_images(paths: &[PathBuf], recursive: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        for entry in WalkDir::new(path)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_file() && is_image_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

fn run_hash(
    paths: Vec<PathBuf>,
    recursive: bool,
    output: OutputFormat,
    legacy_thresholds: bool,
) -> Result<()> {
    let files = collect_images(&paths, recursive);
    if files.is_empty() {
        eprintln!("{}", style("No image files found").yellow());
        return Ok(());
    }

    let mut fingerprinter = Fingerprinter::new();
    if legacy_thresholds {
        fingerprinter = fingerprinter.with_thresholds(HistogramThresholds::legacy());
    }

    let progress = if files.len() > 1 {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    };

    let results: Vec<(PathBuf, Result<Fingerprint>)> = files
        .par_iter()
        .map(|path| {
            let result = fingerprinter.fingerprint_file(path);
            if let Some(bar) = &progress {
                bar.inc(1);
            }
            (path.clone(), result)
        })
        .collect();

    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }

    let mut failures = 0usize;
    match output {
        OutputFormat::Plain => {
            for (path, result) in &results {
                match result {
                    Ok(record) => println!("{}\t{}", path.display(), record.encode()),
                    Err(e) => {
                        failures += 1;
                        eprintln!("{} {}: {}", style("error").red().bold(), path.display(), e);
                    }
                }
            }
        }
        OutputFormat::Json => {
            let mut entries = Vec::with_capacity(results.len());
            for (path, result) in &results {
                match result {
                    Ok(record) => entries.push(serde_json::json!({
                        "path": path,
                        "record": record.encode(),
                        "fingerprint": record,
                    })),
                    Err(e) => {
                        failures += 1;
                        entries.push(serde_json::json!({
                            "path": path,
                            "error": e.to_string(),
                        }));
                    }
                }
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
            );
        }
    }

    if failures > 0 {
        eprintln!(
            "{}",
            style(format!("{} of {} files failed", failures, results.len())).red()
        );
    }

    Ok(())
}
