//! Frame inputs for a series.
//!
//! Frames arrive either as image files written by an external extractor
//! (one file per sampled frame, named in sampling order) or as grids the
//! caller already decoded.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SpectraError;
use crate::frame::PixelGrid;

/// One frame of a series.
#[derive(Debug, Clone)]
pub enum FrameSource {
    /// An image file, decoded lazily when the series is profiled.
    Path(PathBuf),
    /// A frame that is already decoded.
    Grid {
        /// Label carried into the frame's profile.
        identifier: String,
        /// The decoded pixels.
        grid: PixelGrid,
    },
}

impl FrameSource {
    /// List the frame files of a directory in sampling order.
    ///
    /// Every regular file is taken as a frame; subdirectories are skipped.
    /// Files are sorted by name, matching zero-padded extractor output
    /// such as `img000001.png`, `img000002.png`, ...
    ///
    /// # Errors
    ///
    /// Returns [`SpectraError::IoError`] if the directory cannot be read.
    pub fn from_directory<P: AsRef<Path>>(directory: P) -> Result<Vec<FrameSource>, SpectraError> {
        let directory = directory.as_ref();
        log::debug!("Listing frames in {}", directory.display());

        let mut paths = Vec::new();
        for entry in fs::read_dir(directory)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            paths.push(entry.path());
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        log::debug!("Found {} frames in {}", paths.len(), directory.display());
        Ok(paths.into_iter().map(FrameSource::Path).collect())
    }

    /// Wrap an already-decoded grid.
    pub fn grid(identifier: impl Into<String>, grid: PixelGrid) -> Self {
        FrameSource::Grid {
            identifier: identifier.into(),
            grid,
        }
    }

    /// Label used for this frame's profile.
    ///
    /// For files this is the file name; for grids, the caller's identifier.
    pub fn identifier(&self) -> String {
        match self {
            FrameSource::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            FrameSource::Grid { identifier, .. } => identifier.clone(),
        }
    }

    /// Run `reduce` against this frame's pixels, decoding first if needed.
    pub(crate) fn with_grid<T>(
        &self,
        reduce: impl FnOnce(&PixelGrid) -> Result<T, SpectraError>,
    ) -> Result<T, SpectraError> {
        match self {
            FrameSource::Path(path) => reduce(&PixelGrid::open(path)?),
            FrameSource::Grid { grid, .. } => reduce(grid),
        }
    }
}
