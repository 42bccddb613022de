//! # spectrafilm
//!
//! Summarise a video's colour progression as a "barcode" image.
//!
//! `spectrafilm` takes the still frames sampled from a video (extracted by
//! an external tool such as `ffmpeg`), reduces each frame to a few
//! representative colours, and stacks those colours into raster images
//! where every row band is one frame, top to bottom in time order.
//!
//! ## Quick Start
//!
//! ### Profile a frame directory and write barcodes
//!
//! ```no_run
//! use spectrafilm::{AverageMode, BarcodeOptions, FrameSeries, FrameSource, ReductionOptions};
//!
//! let frames = FrameSource::from_directory("out/frames")?;
//! let options = ReductionOptions::new()
//!     .with_average(AverageMode::Quadratic)
//!     .with_median(true)
//!     .with_dominant_count(5);
//!
//! let series = FrameSeries::new(options);
//! let profiles = series.profile(&frames)?;
//! series.write_barcodes(&profiles, &BarcodeOptions::new().with_width(1280), "out")?;
//! # Ok::<(), spectrafilm::SpectraError>(())
//! ```
//!
//! ### Reduce a single frame
//!
//! ```
//! use spectrafilm::{AverageMode, Color, PixelGrid, average_color, median_color};
//!
//! let grid = PixelGrid::new(
//!     2,
//!     2,
//!     vec![Color::WHITE, Color::WHITE, Color::BLACK, Color::BLACK],
//! )?;
//! assert_eq!(average_color(&grid, AverageMode::Linear)?, Color::new(127, 127, 127));
//! assert_eq!(average_color(&grid, AverageMode::Quadratic)?, Color::new(180, 180, 180));
//! assert!(grid.pixels().contains(&median_color(&grid)?));
//! # Ok::<(), spectrafilm::SpectraError>(())
//! ```
//!
//! ## Metrics
//!
//! - **Average**: per-channel linear mean (floored) or root-mean-square
//!   (rounded).
//! - **Median**: the upper-middle pixel once the frame is sorted by hue. It
//!   is a pixel of the frame, not a per-channel statistic.
//! - **Dominant set**: the `N` most frequent exact colours, laid out by hue.
//!
//! ### Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `rayon` | `FrameSeries::profile_parallel()` and parallel band filling |
//! | `full` | Enables all of the above |

pub mod barcode;
pub mod color;
pub mod configuration;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod profile;
pub mod progress;
pub mod reduce;
pub mod source;

pub use barcode::{BarcodeComposer, save_png};
pub use color::{Color, Hsl, compare_by_hue, sort_by_hue};
pub use configuration::{AverageMode, BarcodeOptions, ReductionOptions};
pub use error::SpectraError;
pub use frame::PixelGrid;
pub use pipeline::{AVERAGE_FILE_NAME, FrameSeries, MEDIAN_FILE_NAME, dominant_file_name};
pub use profile::{FrameColorProfile, average_sequence, dominant_sequence, median_sequence};
pub use progress::{OperationType, ProgressCallback, ProgressInfo};
pub use reduce::{FrameReducer, average_color, dominant_colors, median_color};
pub use source::FrameSource;
