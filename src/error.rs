//! Error types for the `spectrafilm` crate.
//!
//! This module defines [`SpectraError`], the unified error type returned by
//! all fallible operations in the crate. Every variant is terminal for the
//! batch operation that raised it: a single bad frame aborts the whole
//! series, and no default colour is ever substituted.

use std::{io::Error as IoError, path::PathBuf};

use thiserror::Error;

/// The unified error type for all `spectrafilm` operations.
///
/// Every public method that can fail returns `Result<T, SpectraError>`.
/// Variants carry enough context to diagnose the problem without needing
/// additional logging at the call site.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpectraError {
    /// A frame with zero pixels was handed to the reducer.
    #[error("Frame contains no pixels")]
    EmptyFrame,

    /// A frame image could not be read or decoded.
    #[error("Failed to decode frame at {path}: {reason}")]
    DecodeFailure {
        /// Path of the frame that failed to decode.
        path: PathBuf,
        /// Underlying reason the decode failed.
        reason: String,
    },

    /// A barcode image could not be encoded or written.
    #[error("Failed to encode image to {path}: {reason}")]
    EncodeFailure {
        /// Destination path of the image.
        path: PathBuf,
        /// Underlying reason the encode failed.
        reason: String,
    },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A pixel buffer does not match the declared grid dimensions.
    #[error("Pixel grid {width}x{height} cannot hold {pixel_count} pixels")]
    GridSizeMismatch {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
        /// Number of pixels actually supplied.
        pixel_count: usize,
    },

    /// A barcode was requested for a series with no frames.
    #[error("Cannot render a barcode from an empty frame series")]
    EmptySeries,

    /// A per-metric sequence was requested for a metric that was not computed.
    #[error("Metric '{0}' was not computed for every frame")]
    MissingMetric(&'static str),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),
}
