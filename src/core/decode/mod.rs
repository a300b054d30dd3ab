//! # Decode Module
//!
//! The external-collaborator boundary: turns a file path into the decoded,
//! orientation-corrected image the hash algorithms consume. The core never
//! retries a failed decode; the typed error lets the caller decide whether
//! to skip, retry through another path, or report the file as unreadable.
//!
//! - JPEG: zune-jpeg (1.5-2x faster than the image crate)
//! - Other formats: image crate fallback
//! - EXIF orientation is applied before any hashing, since every hash is
//!   sensitive to pixel order
//! - GIF frame counts come from the image crate's animation decoder

pub mod resize;

use crate::error::DecodeError;
use image::{AnimationDecoder, DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
use std::fs;
use std::io::BufReader;
use std::path::Path;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Formats with dedicated handling: JPEG gets the fast decoder, GIF gets
/// frame enumeration. Everything else goes straight to the image crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Gif,
    Other,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("jpg" | "jpeg") => Self::Jpeg,
            Some("gif") => Self::Gif,
            _ => Self::Other,
        }
    }
}

/// Fast image decoder that uses optimized decoders per format
pub struct FastDecoder;

impl FastDecoder {
    /// Decode an image and apply its EXIF orientation.
    ///
    /// This is the entry point the fingerprint pipeline uses: the returned
    /// pixels are exactly what the hashes and histogram should see.
    pub fn decode_oriented(path: &Path) -> Result<DynamicImage, DecodeError> {
        let image = Self::decode(path)?;
        Ok(apply_orientation(image, exif_orientation(path)))
    }

    /// Decode an image from a file path using the fastest available decoder
    pub fn decode(path: &Path) -> Result<DynamicImage, DecodeError> {
        match ImageFormat::from_path(path) {
            ImageFormat::Jpeg => Self::decode_jpeg(path).or_else(|_| Self::decode_fallback(path)),
            _ => Self::decode_fallback(path),
        }
    }

    /// Fast JPEG decoding using zune-jpeg
    fn decode_jpeg(path: &Path) -> Result<DynamicImage, DecodeError> {
        let file_bytes = fs::read(path).map_err(|e| DecodeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
        let mut decoder = JpegDecoder::new_with_options(&file_bytes, options);

        let pixels = decoder.decode().map_err(|e| DecodeError::Corrupt {
            path: path.to_path_buf(),
            reason: format!("zune-jpeg decode failed: {:?}", e),
        })?;

        let info = decoder.info().ok_or_else(|| DecodeError::Corrupt {
            path: path.to_path_buf(),
            reason: "Failed to get image info".to_string(),
        })?;

        let width = info.width as u32;
        let height = info.height as u32;
        let out_colorspace = decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB);

        let truncated = || DecodeError::Corrupt {
            path: path.to_path_buf(),
            reason: "Pixel buffer does not match image dimensions".to_string(),
        };

        let image = match out_colorspace {
            ColorSpace::RGB => {
                let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(truncated)?;
                DynamicImage::ImageRgb8(buffer)
            }
            ColorSpace::RGBA => {
                let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(truncated)?;
                DynamicImage::ImageRgba8(buffer)
            }
            ColorSpace::Luma => {
                let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(truncated)?;
                DynamicImage::ImageLuma8(buffer)
            }
            _ => return Self::decode_fallback(path),
        };

        Ok(image)
    }

    /// Fallback to the image crate for everything else
    fn decode_fallback(path: &Path) -> Result<DynamicImage, DecodeError> {
        image::open(path).map_err(|e| match e {
            image::ImageError::Unsupported(_) => DecodeError::UnsupportedFormat {
                path: path.to_path_buf(),
            },
            image::ImageError::IoError(source) => DecodeError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => DecodeError::Corrupt {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })
    }
}

/// Number of animation frames in the file.
///
/// Still formats report 1; a GIF that fails frame enumeration also reports
/// 1, since the fingerprint of its representative frame is still valid.
pub fn frame_count(path: &Path) -> u32 {
    if ImageFormat::from_path(path) != ImageFormat::Gif {
        return 1;
    }

    let Ok(file) = fs::File::open(path) else {
        return 1;
    };
    match image::codecs::gif::GifDecoder::new(BufReader::new(file)) {
        Ok(decoder) => {
            let frames = decoder.into_frames().count() as u32;
            frames.max(1)
        }
        Err(e) => {
            tracing::debug!("frame count fallback for {}: {}", path.display(), e);
            1
        }
    }
}

/// Read the EXIF orientation tag, defaulting to 1 (upright)
fn exif_orientation(path: &Path) -> u32 {
    let Ok(file) = fs::File::open(path) else {
        return 1;
    };
    let mut reader = BufReader::new(file);
    let Ok(exif) = exif::Reader::new().read_from_container(&mut reader) else {
        return 1;
    };
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .unwrap_or(1)
}

/// Apply an EXIF orientation (1-8) to decoded pixels
fn apply_orientation(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}
