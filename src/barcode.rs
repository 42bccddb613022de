//! Barcode rendering.
//!
//! A barcode stacks one row band per frame, top to bottom in frame order.
//! Each band is [`BarcodeOptions::line_height`] pixels tall and spans the
//! full [`BarcodeOptions::width`].
//!
//! - [`BarcodeComposer::render_lines`] fills each band with a single colour.
//! - [`BarcodeComposer::render_columns`] splits each band into one vertical
//!   column per colour of that frame's palette.
//!
//! Pixels are written exactly, with no blending. Bands without colours stay
//! fully transparent. Output is always PNG so the colours survive encoding.
//!
//! # Example
//!
//! ```no_run
//! use spectrafilm::{BarcodeComposer, BarcodeOptions, Color};
//!
//! let composer = BarcodeComposer::new(BarcodeOptions::new().with_width(320))?;
//! let colors = [Color::new(200, 40, 40), Color::new(40, 40, 200)];
//! composer.save_lines(&colors, "avg.png")?;
//! # Ok::<(), spectrafilm::SpectraError>(())
//! ```

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::color::Color;
use crate::configuration::BarcodeOptions;
use crate::error::SpectraError;

const BYTES_PER_PIXEL: usize = 4;

/// Renders colour sequences into barcode rasters.
#[derive(Debug, Clone, Copy)]
pub struct BarcodeComposer {
    options: BarcodeOptions,
}

impl BarcodeComposer {
    /// Create a composer for the given geometry.
    ///
    /// # Errors
    ///
    /// Returns [`SpectraError::InvalidConfiguration`] if the width or line
    /// height is zero.
    pub fn new(options: BarcodeOptions) -> Result<Self, SpectraError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The geometry this composer renders with.
    pub fn options(&self) -> &BarcodeOptions {
        &self.options
    }

    /// Render one solid band per colour.
    ///
    /// The image is `width` wide and `colors.len() * line_height` tall.
    ///
    /// # Errors
    ///
    /// Returns [`SpectraError::EmptySeries`] if `colors` is empty, or
    /// [`SpectraError::InvalidConfiguration`] if the image would be too
    /// large.
    pub fn render_lines(&self, colors: &[Color]) -> Result<RgbaImage, SpectraError> {
        log::debug!(
            "Rendering line barcode ({} frames, width={}, line_height={})",
            colors.len(),
            self.options.width,
            self.options.line_height
        );
        let width = self.options.width;
        self.compose(colors, |color| line_row(*color, width))
    }

    /// Render one band per palette, split into equal-width columns.
    ///
    /// Column `j` of a palette with `n` colours starts at `j * (width / n)`.
    /// The last column extends to the right edge and absorbs the remainder
    /// of the integer division. An empty palette leaves its band
    /// transparent.
    ///
    /// # Errors
    ///
    /// Same as [`render_lines`](BarcodeComposer::render_lines).
    pub fn render_columns(&self, palettes: &[Vec<Color>]) -> Result<RgbaImage, SpectraError> {
        log::debug!(
            "Rendering column barcode ({} frames, width={}, line_height={})",
            palettes.len(),
            self.options.width,
            self.options.line_height
        );
        let width = self.options.width;
        self.compose(palettes, |palette| column_row(palette, width))
    }

    /// Render a line barcode and write it as PNG.
    ///
    /// # Errors
    ///
    /// Rendering errors as for [`render_lines`](BarcodeComposer::render_lines),
    /// or [`SpectraError::EncodeFailure`] if writing fails.
    pub fn save_lines<P: AsRef<Path>>(&self, colors: &[Color], path: P) -> Result<(), SpectraError> {
        let image = self.render_lines(colors)?;
        save_png(&image, path)
    }

    /// Render a column barcode and write it as PNG.
    ///
    /// # Errors
    ///
    /// Rendering errors as for
    /// [`render_columns`](BarcodeComposer::render_columns), or
    /// [`SpectraError::EncodeFailure`] if writing fails.
    pub fn save_columns<P: AsRef<Path>>(
        &self,
        palettes: &[Vec<Color>],
        path: P,
    ) -> Result<(), SpectraError> {
        let image = self.render_columns(palettes)?;
        save_png(&image, path)
    }

    /// Lay out one band per frame, each band repeating the row built by
    /// `row` for every line of its height.
    fn compose<T, F>(&self, frames: &[T], row: F) -> Result<RgbaImage, SpectraError>
    where
        T: Sync,
        F: Fn(&T) -> Vec<u8> + Sync,
    {
        if frames.is_empty() {
            return Err(SpectraError::EmptySeries);
        }

        let height = self.options.image_height(frames.len())?;
        let row_len = self.options.width as usize * BYTES_PER_PIXEL;
        let band_len = row_len * self.options.line_height as usize;
        let total_len = band_len.checked_mul(frames.len()).ok_or_else(|| {
            SpectraError::InvalidConfiguration(format!(
                "{}x{height} image exceeds addressable memory",
                self.options.width
            ))
        })?;
        let mut buffer = vec![0_u8; total_len];

        let fill = |(band, frame): (&mut [u8], &T)| {
            let template = row(frame);
            for line in band.chunks_exact_mut(row_len) {
                line.copy_from_slice(&template);
            }
        };

        #[cfg(feature = "rayon")]
        buffer
            .par_chunks_mut(band_len)
            .zip(frames.par_iter())
            .for_each(fill);

        #[cfg(not(feature = "rayon"))]
        buffer.chunks_mut(band_len).zip(frames.iter()).for_each(fill);

        RgbaImage::from_raw(self.options.width, height, buffer).ok_or_else(|| {
            SpectraError::InvalidConfiguration(format!(
                "pixel buffer does not match {}x{height}",
                self.options.width
            ))
        })
    }
}

/// Write an image as PNG.
///
/// # Errors
///
/// Returns [`SpectraError::EncodeFailure`] if the file cannot be created or
/// encoding fails.
pub fn save_png<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<(), SpectraError> {
    let path = path.as_ref();
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|error| SpectraError::EncodeFailure {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;
    log::info!(
        "Wrote {}x{} barcode to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

/// Pixel span `[start, end)` of column `index` out of `columns` across
/// `width` pixels.
pub(crate) fn column_span(index: usize, columns: usize, width: u32) -> (usize, usize) {
    let width = width as usize;
    let column_width = width / columns;
    let start = (index * column_width).min(width);
    let end = if index + 1 == columns {
        width
    } else {
        (start + column_width).min(width)
    };
    (start, end)
}

fn line_row(color: Color, width: u32) -> Vec<u8> {
    let pixel = Rgba::<u8>::from(color).0;
    pixel.repeat(width as usize)
}

fn column_row(palette: &[Color], width: u32) -> Vec<u8> {
    let mut row = vec![0_u8; width as usize * BYTES_PER_PIXEL];
    for (index, &color) in palette.iter().enumerate() {
        let (start, end) = column_span(index, palette.len(), width);
        let pixel = Rgba::<u8>::from(color).0;
        let span = &mut row[start * BYTES_PER_PIXEL..end * BYTES_PER_PIXEL];
        for chunk in span.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&pixel);
        }
    }
    row
}
