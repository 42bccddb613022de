//! Per-frame colour profiles and per-metric sequences.

use crate::color::Color;
use crate::error::SpectraError;

/// The reduced colours of one frame.
///
/// Metrics that were not requested are `None` (or an empty `dominant`
/// set). A requested dominant set may still be shorter than the requested
/// size when the frame has fewer distinct colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameColorProfile {
    /// Identifier of the source frame (file name or caller-supplied label).
    pub identifier: String,
    /// Average colour, if computed.
    pub average: Option<Color>,
    /// Hue-sorted median pixel, if computed.
    pub median: Option<Color>,
    /// Dominant colours in ascending hue order.
    pub dominant: Vec<Color>,
}

impl FrameColorProfile {
    /// `#RRGGBB` forms of the dominant set, in order.
    pub fn dominant_hex(&self) -> Vec<String> {
        self.dominant.iter().map(ToString::to_string).collect()
    }
}

/// The average colour of every frame, in frame order.
///
/// # Errors
///
/// Returns [`SpectraError::MissingMetric`] if any profile lacks an average.
pub fn average_sequence(profiles: &[FrameColorProfile]) -> Result<Vec<Color>, SpectraError> {
    profiles
        .iter()
        .map(|profile| profile.average.ok_or(SpectraError::MissingMetric("average")))
        .collect()
}

/// The median colour of every frame, in frame order.
///
/// # Errors
///
/// Returns [`SpectraError::MissingMetric`] if any profile lacks a median.
pub fn median_sequence(profiles: &[FrameColorProfile]) -> Result<Vec<Color>, SpectraError> {
    profiles
        .iter()
        .map(|profile| profile.median.ok_or(SpectraError::MissingMetric("median")))
        .collect()
}

/// The dominant set of every frame, in frame order.
///
/// A reduced non-empty frame always has at least one dominant colour, so an
/// empty set means the metric was never computed.
///
/// # Errors
///
/// Returns [`SpectraError::MissingMetric`] if any profile has an empty
/// dominant set.
pub fn dominant_sequence(profiles: &[FrameColorProfile]) -> Result<Vec<Vec<Color>>, SpectraError> {
    profiles
        .iter()
        .map(|profile| {
            if profile.dominant.is_empty() {
                Err(SpectraError::MissingMetric("dominant"))
            } else {
                Ok(profile.dominant.clone())
            }
        })
        .collect()
}
