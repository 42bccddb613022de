//! Per-frame reduction tests: average, median, dominant set.

use spectrafilm::{
    AverageMode, Color, FrameReducer, PixelGrid, ReductionOptions, average_color,
    dominant_colors, median_color,
};

const RED: Color = Color::new(255, 0, 0);
const GREEN: Color = Color::new(0, 255, 0);
const BLUE: Color = Color::new(0, 0, 255);

fn grid_of(pixels: Vec<Color>) -> PixelGrid {
    let width = pixels.len() as u32;
    PixelGrid::new(width, 1, pixels).expect("valid grid")
}

fn white_over_black() -> PixelGrid {
    PixelGrid::new(
        2,
        2,
        vec![Color::WHITE, Color::WHITE, Color::BLACK, Color::BLACK],
    )
    .expect("valid grid")
}

// ── Average ────────────────────────────────────────────────────────

#[test]
fn linear_average_floors() {
    let average = average_color(&white_over_black(), AverageMode::Linear).unwrap();
    assert_eq!(average, Color::new(127, 127, 127));
}

#[test]
fn quadratic_average_rounds_root_mean_square() {
    // sqrt((255² + 255² + 0 + 0) / 4) = 180.31...
    let average = average_color(&white_over_black(), AverageMode::Quadratic).unwrap();
    assert_eq!(average, Color::new(180, 180, 180));
}

#[test]
fn quadratic_average_rounds_up() {
    // sqrt((1 + 4) / 2) = 1.58 -> 2, where truncation would give 1.
    let grid = grid_of(vec![Color::new(1, 1, 1), Color::new(2, 2, 2)]);
    let average = average_color(&grid, AverageMode::Quadratic).unwrap();
    assert_eq!(average, Color::new(2, 2, 2));
}

#[test]
fn linear_average_matches_floor_per_channel() {
    let pixels = vec![
        Color::new(10, 200, 3),
        Color::new(11, 201, 4),
        Color::new(12, 0, 4),
    ];
    let grid = grid_of(pixels);
    let average = average_color(&grid, AverageMode::Linear).unwrap();
    assert_eq!(average, Color::new(11, 133, 3));
    // Running again yields the same colour.
    assert_eq!(average_color(&grid, AverageMode::Linear).unwrap(), average);
}

#[test]
fn uniform_frame_averages_agree() {
    let color = Color::new(37, 142, 251);
    let grid = PixelGrid::filled(16, 9, color);
    assert_eq!(average_color(&grid, AverageMode::Linear).unwrap(), color);
    assert_eq!(average_color(&grid, AverageMode::Quadratic).unwrap(), color);
}

// ── Median ─────────────────────────────────────────────────────────

#[test]
fn median_picks_upper_middle_by_hue() {
    // Sorted by hue: red (0), green (1/3), blue (2/3). Index 3/2 = 1.
    let grid = grid_of(vec![BLUE, RED, GREEN]);
    assert_eq!(median_color(&grid).unwrap(), GREEN);
}

#[test]
fn median_of_two_is_the_later_hue() {
    let grid = grid_of(vec![BLUE, RED]);
    assert_eq!(median_color(&grid).unwrap(), BLUE);
}

#[test]
fn median_is_a_pixel_of_the_frame() {
    let pixels: Vec<Color> = (0..50_u8)
        .map(|index| Color::new(index * 5, 255 - index * 3, index.wrapping_mul(37)))
        .collect();
    let grid = grid_of(pixels.clone());
    let median = median_color(&grid).unwrap();
    assert!(pixels.contains(&median));
}

// ── Dominant set ───────────────────────────────────────────────────

#[test]
fn dominant_keeps_most_frequent_sorted_by_hue() {
    let mut pixels = vec![RED; 5];
    pixels.extend(vec![BLUE; 3]);
    pixels.push(GREEN);
    let grid = grid_of(pixels);

    let dominant = dominant_colors(&grid, 2).unwrap();
    assert_eq!(dominant, vec![RED, BLUE]);
}

#[test]
fn dominant_of_single_colour_frame_is_one_colour() {
    let grid = PixelGrid::filled(30, 20, GREEN);
    for count in [1, 2, 10] {
        assert_eq!(dominant_colors(&grid, count).unwrap(), vec![GREEN]);
    }
}

#[test]
fn dominant_is_never_padded() {
    let grid = grid_of(vec![RED, GREEN, RED]);
    let dominant = dominant_colors(&grid, 8).unwrap();
    assert_eq!(dominant, vec![RED, GREEN]);
}

#[test]
fn dominant_has_no_duplicates_and_is_hue_ascending() {
    let pixels: Vec<Color> = (0..200_u32)
        .map(|index| Color::new((index % 7 * 30) as u8, (index % 5 * 50) as u8, 90))
        .collect();
    let grid = grid_of(pixels);
    let dominant = dominant_colors(&grid, 12).unwrap();

    assert_eq!(dominant.len(), 12);
    for (index, color) in dominant.iter().enumerate() {
        assert!(!dominant[index + 1..].contains(color));
    }
    for pair in dominant.windows(2) {
        assert!(pair[0].to_hsl().hue <= pair[1].to_hsl().hue);
    }
}

#[test]
fn dominant_ties_prefer_first_seen() {
    // Blue and green both occur twice; blue appears first.
    let grid = grid_of(vec![RED, RED, RED, BLUE, GREEN, BLUE, GREEN]);
    assert_eq!(dominant_colors(&grid, 2).unwrap(), vec![RED, BLUE]);
}

#[test]
fn dominant_count_zero_is_empty() {
    let grid = grid_of(vec![RED]);
    assert!(dominant_colors(&grid, 0).unwrap().is_empty());
}

// ── FrameReducer ───────────────────────────────────────────────────

#[test]
fn reducer_fills_only_enabled_metrics() {
    let grid = grid_of(vec![RED, RED, BLUE]);

    let profile = FrameReducer::new(ReductionOptions::new())
        .reduce("only-average", &grid)
        .unwrap();
    assert_eq!(profile.identifier, "only-average");
    assert_eq!(profile.average, Some(Color::new(170, 0, 85)));
    assert_eq!(profile.median, None);
    assert!(profile.dominant.is_empty());

    let options = ReductionOptions::new()
        .without_average()
        .with_median(true)
        .with_dominant_count(3);
    let profile = FrameReducer::new(options).reduce("no-average", &grid).unwrap();
    assert_eq!(profile.average, None);
    assert_eq!(profile.median, Some(RED));
    assert_eq!(profile.dominant, vec![RED, BLUE]);
}

#[test]
fn reducer_uses_quadratic_mode() {
    let options = ReductionOptions::new().with_average(AverageMode::Quadratic);
    let profile = FrameReducer::new(options)
        .reduce("square", &white_over_black())
        .unwrap();
    assert_eq!(profile.average, Some(Color::new(180, 180, 180)));
}

#[test]
fn grid_from_image_drops_alpha() {
    let mut image = image::RgbaImage::new(2, 1);
    image.put_pixel(0, 0, image::Rgba([10, 20, 30, 0]));
    image.put_pixel(1, 0, image::Rgba([40, 50, 60, 255]));
    let grid = PixelGrid::from_image(&image::DynamicImage::ImageRgba8(image));

    assert_eq!(grid.width(), 2);
    assert_eq!(grid.height(), 1);
    assert_eq!(
        grid.pixels(),
        &[Color::new(10, 20, 30), Color::new(40, 50, 60)]
    );
}
