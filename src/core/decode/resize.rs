//! Fast SIMD-accelerated image resizing.
//!
//! Uses fast_image_resize, which picks AVX2/NEON kernels when available.
//! All hash inputs are produced here with a fixed Lanczos3 filter: the
//! resampling filter changes hash values, so it is part of the fingerprint
//! contract and must never vary between runs or machines.

use crate::error::HashError;
use fast_image_resize::{images::Image, PixelType, ResizeOptions, Resizer};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};

/// Reusable SIMD resizer for grayscale hash inputs
pub struct GrayResizer {
    resizer: Resizer,
}

impl GrayResizer {
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
        }
    }

    /// Convert to grayscale and resize to the exact target dimensions.
    ///
    /// Grayscale conversion happens first; resizing one channel is cheaper
    /// than resizing three and converting after. A zero-area source is a
    /// degenerate image, not an error: it resolves to an all-black target
    /// grid. Only a zero target dimension is rejected.
    pub fn resize_to_grayscale(
        &mut self,
        image: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<GrayImage, HashError> {
        let gray = image.to_luma8();

        let src_width = gray.width();
        let src_height = gray.height();

        if width == 0 || height == 0 {
            return Err(HashError::InvalidDimensions { width, height });
        }

        // A source with no pixels contributes nothing; an all-black grid
        // makes every downstream hash come out zero instead of failing.
        if src_width == 0 || src_height == 0 {
            return Ok(GrayImage::new(width, height));
        }

        let src_image = Image::from_vec_u8(src_width, src_height, gray.into_raw(), PixelType::U8)
            .map_err(|e| HashError::ResizeFailed {
                reason: format!("Failed to create source image: {}", e),
            })?;

        let mut dst_image = Image::new(width, height, PixelType::U8);

        // Lanczos3 is the fixed resampling filter for all hash inputs
        let options = ResizeOptions::new().resize_alg(fast_image_resize::ResizeAlg::Convolution(
            fast_image_resize::FilterType::Lanczos3,
        ));

        self.resizer
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| HashError::ResizeFailed {
                reason: format!("Resize failed: {}", e),
            })?;

        let result_buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
            ImageBuffer::from_raw(width, height, dst_image.into_vec()).ok_or_else(|| {
                HashError::ResizeFailed {
                    reason: "Failed to create result buffer".to_string(),
                }
            })?;

        Ok(result_buffer)
    }
}

impl Default for GrayResizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function for one-off resizing
pub fn resize_to_grayscale(
    image: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<GrayImage, HashError> {
    let mut resizer = GrayResizer::new();
    resizer.resize_to_grayscale(image, width, height)
}
