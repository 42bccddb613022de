//! Per-frame colour reduction.
//!
//! Each reduction is a pure function of one [`PixelGrid`]:
//!
//! - [`average_color`]: per-channel linear mean (floored) or root-mean-square
//!   (rounded), selected by [`AverageMode`].
//! - [`median_color`]: the pixel at index `len / 2` once all pixels are
//!   sorted by hue. This is a positional pick, never a blend.
//! - [`dominant_colors`]: the `N` most frequent exact colours, re-sorted by
//!   hue for display.
//!
//! [`FrameReducer`] runs whichever of these a [`ReductionOptions`] enables
//! and packs the results into a [`FrameColorProfile`].
//!
//! # Example
//!
//! ```
//! use spectrafilm::{Color, FrameReducer, PixelGrid, ReductionOptions};
//!
//! let grid = PixelGrid::filled(4, 4, Color::new(10, 20, 30));
//! let reducer = FrameReducer::new(ReductionOptions::all());
//! let profile = reducer.reduce("frame-0", &grid)?;
//! assert_eq!(profile.average, Some(Color::new(10, 20, 30)));
//! assert_eq!(profile.dominant, vec![Color::new(10, 20, 30)]);
//! # Ok::<(), spectrafilm::SpectraError>(())
//! ```

use std::collections::HashMap;

use crate::color::{Color, sort_by_hue};
use crate::configuration::{AverageMode, ReductionOptions};
use crate::error::SpectraError;
use crate::frame::PixelGrid;
use crate::profile::FrameColorProfile;

/// Runs the configured reductions over single frames.
#[derive(Debug, Clone, Default)]
pub struct FrameReducer {
    options: ReductionOptions,
}

impl FrameReducer {
    /// Create a reducer for the given options.
    pub fn new(options: ReductionOptions) -> Self {
        Self { options }
    }

    /// The options this reducer applies.
    pub fn options(&self) -> &ReductionOptions {
        &self.options
    }

    /// Reduce one frame to its colour profile.
    ///
    /// Metrics disabled in the options are left empty in the profile.
    ///
    /// # Errors
    ///
    /// Returns [`SpectraError::EmptyFrame`] if the grid has no pixels.
    pub fn reduce(
        &self,
        identifier: impl Into<String>,
        grid: &PixelGrid,
    ) -> Result<FrameColorProfile, SpectraError> {
        let identifier = identifier.into();
        log::debug!(
            "Reducing frame {} ({}x{}, options={:?})",
            identifier,
            grid.width(),
            grid.height(),
            self.options
        );
        ensure_not_empty(grid)?;

        let average = self
            .options
            .average
            .map(|mode| average_color(grid, mode))
            .transpose()?;
        let median = if self.options.median {
            Some(median_color(grid)?)
        } else {
            None
        };
        let dominant = if self.options.dominant_count > 0 {
            dominant_colors(grid, self.options.dominant_count)?
        } else {
            Vec::new()
        };

        Ok(FrameColorProfile {
            identifier,
            average,
            median,
            dominant,
        })
    }
}

/// Per-channel average of every pixel in the grid.
///
/// [`AverageMode::Linear`] floors the arithmetic mean.
/// [`AverageMode::Quadratic`] takes the square root of the mean of squares
/// and rounds to the nearest integer.
///
/// # Errors
///
/// Returns [`SpectraError::EmptyFrame`] if the grid has no pixels.
pub fn average_color(grid: &PixelGrid, mode: AverageMode) -> Result<Color, SpectraError> {
    ensure_not_empty(grid)?;
    let count = grid.len();

    let color = match mode {
        AverageMode::Linear => {
            let mut sums = [0_u64; 3];
            for pixel in grid.pixels() {
                for (sum, channel) in sums.iter_mut().zip(pixel.channels()) {
                    *sum += u64::from(channel);
                }
            }
            let count = count as u64;
            Color::from(sums.map(|sum| (sum / count) as u8))
        }
        AverageMode::Quadratic => {
            let mut sums = [0.0_f64; 3];
            for pixel in grid.pixels() {
                for (sum, channel) in sums.iter_mut().zip(pixel.channels()) {
                    let value = f64::from(channel);
                    *sum += value * value;
                }
            }
            let count = count as f64;
            Color::from(sums.map(|sum| (sum / count).sqrt().round().min(255.0) as u8))
        }
    };

    Ok(color)
}

/// The pixel at the upper-middle position of the grid sorted by hue.
///
/// For an even pixel count the element at `len / 2` is chosen. The result
/// is always one of the grid's own pixels.
///
/// # Errors
///
/// Returns [`SpectraError::EmptyFrame`] if the grid has no pixels.
pub fn median_color(grid: &PixelGrid) -> Result<Color, SpectraError> {
    ensure_not_empty(grid)?;
    let mut sorted = grid.pixels().to_vec();
    sort_by_hue(&mut sorted);
    Ok(sorted[sorted.len() / 2])
}

/// Occurrence count of one exact colour.
#[derive(Debug, Clone, Copy)]
struct ColorCount {
    color: Color,
    occurrences: usize,
    first_seen: usize,
}

/// The `count` most frequent exact colours, sorted by ascending hue.
///
/// Colours are ranked by occurrence count, most frequent first. Equal
/// counts are broken by which colour appears first in row-major order.
/// Fewer than `count` colours are returned when the grid has fewer
/// distinct colours; the set is never padded.
///
/// # Errors
///
/// Returns [`SpectraError::EmptyFrame`] if the grid has no pixels.
pub fn dominant_colors(grid: &PixelGrid, count: usize) -> Result<Vec<Color>, SpectraError> {
    ensure_not_empty(grid)?;
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut counts: HashMap<Color, ColorCount> = HashMap::new();
    for (index, &color) in grid.pixels().iter().enumerate() {
        counts
            .entry(color)
            .or_insert(ColorCount {
                color,
                occurrences: 0,
                first_seen: index,
            })
            .occurrences += 1;
    }

    let mut ranked: Vec<ColorCount> = counts.into_values().collect();
    ranked.sort_unstable_by(|a, b| {
        b.occurrences
            .cmp(&a.occurrences)
            .then(a.first_seen.cmp(&b.first_seen))
    });

    let mut selected: Vec<Color> = ranked
        .into_iter()
        .take(count)
        .map(|entry| entry.color)
        .collect();
    sort_by_hue(&mut selected);
    Ok(selected)
}

fn ensure_not_empty(grid: &PixelGrid) -> Result<(), SpectraError> {
    if grid.is_empty() {
        return Err(SpectraError::EmptyFrame);
    }
    Ok(())
}
