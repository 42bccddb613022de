//! Decoded frame pixels.
//!
//! A [`PixelGrid`] is the read-only input to every reduction: a row-major
//! buffer of [`Color`] values with explicit dimensions. Grids come either
//! from an already-decoded [`image::DynamicImage`] or straight from a frame
//! file on disk.

use std::path::Path;

use image::DynamicImage;

use crate::color::Color;
use crate::error::SpectraError;

/// A rectangular, row-major grid of opaque colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// Build a grid from a row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SpectraError::GridSizeMismatch`] if `pixels.len()` is not
    /// `width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, SpectraError> {
        let expected = (width as usize).checked_mul(height as usize);
        if expected != Some(pixels.len()) {
            return Err(SpectraError::GridSizeMismatch {
                width,
                height,
                pixel_count: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a grid filled with a single colour.
    ///
    /// # Panics
    ///
    /// Panics with a capacity overflow if `width * height` pixels cannot be
    /// allocated, like [`vec!`].
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let len = (width as usize)
            .checked_mul(height as usize)
            .unwrap_or(usize::MAX);
        Self {
            width,
            height,
            pixels: vec![color; len],
        }
    }

    /// Convert a decoded image to a grid. Any alpha channel is dropped.
    pub fn from_image(image: &DynamicImage) -> Self {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb.pixels().map(|pixel| Color::from(*pixel)).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Decode a frame image from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SpectraError::DecodeFailure`] if the file cannot be opened
    /// or is not a decodable image.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SpectraError> {
        let path = path.as_ref();
        log::debug!("Decoding frame {}", path.display());
        let image = image::open(path).map_err(|error| SpectraError::DecodeFailure {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;
        Ok(Self::from_image(&image))
    }

    /// Grid width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Returns `true` if the grid holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}
