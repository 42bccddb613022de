//! Error handling integration tests.
//!
//! These tests verify that meaningful errors are returned for various
//! failure conditions.

use spectrafilm::{
    AverageMode, Color, FrameReducer, FrameSource, PixelGrid, ReductionOptions, SpectraError,
    average_color, dominant_colors, median_color,
};

#[test]
fn empty_frame_is_rejected_by_every_reduction() {
    let grid = PixelGrid::new(0, 5, Vec::new()).expect("zero-width grid is well formed");

    assert!(matches!(
        average_color(&grid, AverageMode::Linear),
        Err(SpectraError::EmptyFrame)
    ));
    assert!(matches!(
        average_color(&grid, AverageMode::Quadratic),
        Err(SpectraError::EmptyFrame)
    ));
    assert!(matches!(median_color(&grid), Err(SpectraError::EmptyFrame)));
    assert!(matches!(
        dominant_colors(&grid, 3),
        Err(SpectraError::EmptyFrame)
    ));

    let result = FrameReducer::new(ReductionOptions::all()).reduce("empty", &grid);
    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("no pixels"),
        "Error message should mention the empty frame: {error_message}",
    );
}

#[test]
fn mismatched_grid_is_rejected() {
    let result = PixelGrid::new(3, 3, vec![Color::BLACK; 8]);
    match result {
        Err(SpectraError::GridSizeMismatch {
            width,
            height,
            pixel_count,
        }) => {
            assert_eq!((width, height, pixel_count), (3, 3, 8));
        }
        other => panic!("expected GridSizeMismatch, got {other:?}"),
    }
}

#[test]
fn filled_grid_matches_checked_size() {
    let grid = PixelGrid::filled(3, 2, Color::WHITE);
    assert_eq!(grid.len(), 6);
    assert_eq!(
        PixelGrid::new(3, 2, grid.pixels().to_vec()).unwrap(),
        grid
    );
}

#[test]
#[should_panic(expected = "capacity overflow")]
fn filled_grid_too_large_to_allocate_panics() {
    let _ = PixelGrid::filled(u32::MAX, u32::MAX, Color::BLACK);
}

#[test]
fn open_nonexistent_frame() {
    let result = PixelGrid::open("this_frame_does_not_exist.png");
    assert!(result.is_err());

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("Failed to decode frame"),
        "Error message should mention decode failure: {error_message}",
    );
}

#[test]
fn open_invalid_frame() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_frame_path = temporary_directory.path().join("invalid.png");
    std::fs::write(&invalid_frame_path, b"this is not an image")
        .expect("Failed to write invalid file");

    let result = PixelGrid::open(&invalid_frame_path);
    assert!(
        matches!(result, Err(SpectraError::DecodeFailure { .. })),
        "Expected decode failure for invalid image"
    );
}

#[test]
fn missing_frame_directory_is_io_error() {
    let result = FrameSource::from_directory("no_such_frames_directory");
    assert!(matches!(result, Err(SpectraError::IoError(_))));
}
