//! Reduction and rendering configuration.
//!
//! [`ReductionOptions`] selects which colours are computed for each frame;
//! [`BarcodeOptions`] fixes the raster geometry. Both are plain values built
//! once and passed by reference, so concurrent reductions share nothing
//! mutable.
//!
//! # Example
//!
//! ```
//! use spectrafilm::{AverageMode, BarcodeOptions, ReductionOptions};
//!
//! let reduction = ReductionOptions::new()
//!     .with_average(AverageMode::Quadratic)
//!     .with_median(true)
//!     .with_dominant_count(5);
//! let barcode = BarcodeOptions::new().with_width(1280).with_line_height(2);
//!
//! assert!(reduction.validate().is_ok());
//! assert!(barcode.validate().is_ok());
//! ```

use crate::error::SpectraError;

/// Default barcode width in pixels.
pub const DEFAULT_WIDTH: u32 = 720;

/// Default thickness of one frame's row band in pixels.
pub const DEFAULT_LINE_HEIGHT: u32 = 1;

/// How the per-channel average is accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AverageMode {
    /// Arithmetic mean, floored to an integer channel value.
    #[default]
    Linear,
    /// Root-mean-square, rounded to the nearest integer channel value.
    Quadratic,
}

/// Which colours to compute for every frame.
///
/// The default computes a linear average only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct ReductionOptions {
    /// Average accumulation mode. `None` skips the average.
    pub average: Option<AverageMode>,
    /// Whether to compute the hue-sorted median pixel.
    pub median: bool,
    /// Size of the dominant-colour set. `0` skips it.
    pub dominant_count: usize,
}

impl Default for ReductionOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ReductionOptions {
    /// Create options that compute a linear average only.
    pub fn new() -> Self {
        Self {
            average: Some(AverageMode::Linear),
            median: false,
            dominant_count: 0,
        }
    }

    /// Enable every metric: average, median, and a dominant set of at least
    /// one colour.
    pub fn all() -> Self {
        Self {
            average: Some(AverageMode::Linear),
            median: true,
            dominant_count: 1,
        }
    }

    /// Compute the average with the given accumulation mode.
    pub fn with_average(mut self, mode: AverageMode) -> Self {
        self.average = Some(mode);
        self
    }

    /// Skip the average.
    pub fn without_average(mut self) -> Self {
        self.average = None;
        self
    }

    /// Enable or disable the median.
    pub fn with_median(mut self, median: bool) -> Self {
        self.median = median;
        self
    }

    /// Set the dominant-set size. `0` disables it.
    pub fn with_dominant_count(mut self, count: usize) -> Self {
        self.dominant_count = count;
        self
    }

    /// Returns `true` if at least one metric is enabled.
    pub fn has_metrics(&self) -> bool {
        self.average.is_some() || self.median || self.dominant_count > 0
    }

    /// Check that the options describe useful work.
    ///
    /// # Errors
    ///
    /// Returns [`SpectraError::InvalidConfiguration`] if no metric is
    /// enabled.
    pub fn validate(&self) -> Result<(), SpectraError> {
        if !self.has_metrics() {
            return Err(SpectraError::InvalidConfiguration(
                "no metric enabled (average, median, or dominant count > 0)".to_string(),
            ));
        }
        Ok(())
    }
}

/// Raster geometry shared by every barcode renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct BarcodeOptions {
    /// Image width in pixels.
    pub width: u32,
    /// Height of each frame's row band in pixels.
    pub line_height: u32,
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            line_height: DEFAULT_LINE_HEIGHT,
        }
    }
}

impl BarcodeOptions {
    /// Create options with the default 720px width and 1px lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the row band thickness.
    pub fn with_line_height(mut self, line_height: u32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Check that both dimensions are positive.
    ///
    /// # Errors
    ///
    /// Returns [`SpectraError::InvalidConfiguration`] if the width or the
    /// line height is zero.
    pub fn validate(&self) -> Result<(), SpectraError> {
        if self.width == 0 {
            return Err(SpectraError::InvalidConfiguration(
                "image width must be greater than zero".to_string(),
            ));
        }
        if self.line_height == 0 {
            return Err(SpectraError::InvalidConfiguration(
                "line height must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Height of an image holding `frame_count` row bands.
    pub(crate) fn image_height(&self, frame_count: usize) -> Result<u32, SpectraError> {
        u32::try_from(frame_count)
            .ok()
            .and_then(|count| count.checked_mul(self.line_height))
            .ok_or_else(|| {
                SpectraError::InvalidConfiguration(format!(
                    "{frame_count} frames at line height {} exceed the maximum image height",
                    self.line_height
                ))
            })
    }
}
