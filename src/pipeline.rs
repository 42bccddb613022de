//! Frame series processing.
//!
//! [`FrameSeries`] reduces an ordered list of frames to colour profiles and
//! renders the per-metric barcodes. Profiles always come back in input
//! order, whether frames were reduced sequentially or across rayon threads.
//! The first frame that fails to decode or reduce aborts the whole series.
//!
//! # Example
//!
//! ```no_run
//! use spectrafilm::{BarcodeOptions, FrameSeries, FrameSource, ReductionOptions};
//!
//! let frames = FrameSource::from_directory("out/frames")?;
//! let series = FrameSeries::new(ReductionOptions::all().with_dominant_count(5));
//! let profiles = series.profile(&frames)?;
//! let written = series.write_barcodes(&profiles, &BarcodeOptions::new(), "out")?;
//! for path in written {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), spectrafilm::SpectraError>(())
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
#[cfg(feature = "rayon")]
use std::sync::Mutex;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::barcode::BarcodeComposer;
use crate::configuration::{BarcodeOptions, ReductionOptions};
use crate::error::SpectraError;
use crate::profile::{FrameColorProfile, average_sequence, dominant_sequence, median_sequence};
use crate::progress::{NoOpProgress, OperationType, ProgressCallback, ProgressTracker};
use crate::reduce::FrameReducer;
use crate::source::FrameSource;

/// File name of the average barcode.
pub const AVERAGE_FILE_NAME: &str = "avg.png";
/// File name of the median barcode.
pub const MEDIAN_FILE_NAME: &str = "med.png";

/// File name of the dominant-colour barcode for a set of `count` colours.
pub fn dominant_file_name(count: usize) -> String {
    format!("mode_{count}.png")
}

/// Reduces an ordered frame series and renders its barcodes.
#[derive(Clone)]
pub struct FrameSeries {
    reducer: FrameReducer,
    progress: Arc<dyn ProgressCallback>,
    batch_size: u64,
}

impl Debug for FrameSeries {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FrameSeries")
            .field("options", self.reducer.options())
            .field("has_progress", &true)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl FrameSeries {
    /// Create a series processor for the given reduction options.
    pub fn new(options: ReductionOptions) -> Self {
        Self {
            reducer: FrameReducer::new(options),
            progress: Arc::new(NoOpProgress),
            batch_size: 1,
        }
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Set how often the progress callback fires.
    ///
    /// A value of 1 means every frame; 10 means every 10th frame.
    /// Clamped to a minimum of 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// The reduction options applied to every frame.
    pub fn options(&self) -> &ReductionOptions {
        self.reducer.options()
    }

    /// Reduce every frame, one after another, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`SpectraError::InvalidConfiguration`] if no metric is
    /// enabled, or the first decode/reduction error encountered.
    pub fn profile(&self, frames: &[FrameSource]) -> Result<Vec<FrameColorProfile>, SpectraError> {
        self.reducer.options().validate()?;
        log::debug!("Profiling {} frames sequentially", frames.len());

        let mut tracker = self.tracker(OperationType::FrameReduction, frames.len());
        let mut profiles = Vec::with_capacity(frames.len());
        for (index, frame) in frames.iter().enumerate() {
            profiles.push(self.reduce_frame(frame)?);
            tracker.advance(Some(index as u64));
        }
        tracker.finish();

        Ok(profiles)
    }

    /// Reduce frames across rayon threads.
    ///
    /// Each worker decodes and reduces its own frames; results are put back
    /// in input order before returning, so the output is identical to
    /// [`profile`](FrameSeries::profile).
    ///
    /// # Errors
    ///
    /// Same as [`profile`](FrameSeries::profile). Which failing frame is
    /// reported is not fixed when several fail.
    #[cfg(feature = "rayon")]
    pub fn profile_parallel(
        &self,
        frames: &[FrameSource],
    ) -> Result<Vec<FrameColorProfile>, SpectraError> {
        self.reducer.options().validate()?;
        log::debug!("Profiling {} frames in parallel", frames.len());

        let tracker = Mutex::new(self.tracker(OperationType::FrameReduction, frames.len()));
        let mut indexed: Vec<(usize, FrameColorProfile)> = frames
            .par_iter()
            .enumerate()
            .map(|(index, frame)| {
                let profile = self.reduce_frame(frame)?;
                if let Ok(mut tracker) = tracker.lock() {
                    tracker.advance(Some(index as u64));
                }
                Ok((index, profile))
            })
            .collect::<Result<_, SpectraError>>()?;

        indexed.sort_by_key(|(index, _)| *index);
        if let Ok(mut tracker) = tracker.lock() {
            tracker.finish();
        }

        Ok(indexed.into_iter().map(|(_, profile)| profile).collect())
    }

    /// Render every enabled metric's barcode into `output_directory`.
    ///
    /// Writes `avg.png`, `med.png` and `mode_<N>.png` for the metrics the
    /// options enable, in that order, and returns the written paths. The
    /// directory must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`SpectraError::InvalidConfiguration`] for bad geometry,
    /// [`SpectraError::EmptySeries`] if `profiles` is empty,
    /// [`SpectraError::MissingMetric`] if the profiles were reduced with
    /// different options, or [`SpectraError::EncodeFailure`] if a write
    /// fails.
    pub fn write_barcodes<P: AsRef<Path>>(
        &self,
        profiles: &[FrameColorProfile],
        barcode: &BarcodeOptions,
        output_directory: P,
    ) -> Result<Vec<PathBuf>, SpectraError> {
        let composer = BarcodeComposer::new(*barcode)?;
        let options = self.reducer.options();
        let output_directory = output_directory.as_ref();
        log::debug!(
            "Writing barcodes for {} frames to {}",
            profiles.len(),
            output_directory.display()
        );

        let image_count = usize::from(options.average.is_some())
            + usize::from(options.median)
            + usize::from(options.dominant_count > 0);
        let mut tracker = self.tracker(OperationType::BarcodeRendering, image_count);
        let mut written = Vec::with_capacity(image_count);

        if options.average.is_some() {
            let path = output_directory.join(AVERAGE_FILE_NAME);
            composer.save_lines(&average_sequence(profiles)?, &path)?;
            written.push(path);
            tracker.advance(None);
        }

        if options.median {
            let path = output_directory.join(MEDIAN_FILE_NAME);
            composer.save_lines(&median_sequence(profiles)?, &path)?;
            written.push(path);
            tracker.advance(None);
        }

        if options.dominant_count > 0 {
            let path = output_directory.join(dominant_file_name(options.dominant_count));
            composer.save_columns(&dominant_sequence(profiles)?, &path)?;
            written.push(path);
            tracker.advance(None);
        }

        tracker.finish();
        Ok(written)
    }

    fn reduce_frame(&self, frame: &FrameSource) -> Result<FrameColorProfile, SpectraError> {
        frame.with_grid(|grid| self.reducer.reduce(frame.identifier(), grid))
    }

    fn tracker(&self, operation: OperationType, total: usize) -> ProgressTracker {
        ProgressTracker::new(
            Arc::clone(&self.progress),
            operation,
            Some(total as u64),
            self.batch_size,
        )
    }
}
