//! Benchmarks for frame reduction and barcode rendering.
//!
//! Run with: cargo bench
//! Run with all features: cargo bench --all-features

use criterion::{Criterion, criterion_group, criterion_main};
use spectrafilm::{
    AverageMode, BarcodeComposer, BarcodeOptions, Color, FrameSeries, FrameSource, PixelGrid,
    ReductionOptions, average_color, dominant_colors, median_color,
};

/// A 480x270 frame with a smooth gradient and a few thousand distinct colours.
fn gradient_frame() -> PixelGrid {
    let (width, height) = (480_u32, 270_u32);
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| Color::new((x / 2) as u8, (y * 255 / height) as u8, ((x + y) / 8) as u8))
        })
        .collect();
    PixelGrid::new(width, height, pixels).unwrap()
}

fn benchmark_reductions(criterion: &mut Criterion) {
    let grid = gradient_frame();

    criterion.bench_function("average (linear)", |bencher| {
        bencher.iter(|| average_color(&grid, AverageMode::Linear).unwrap());
    });

    criterion.bench_function("average (quadratic)", |bencher| {
        bencher.iter(|| average_color(&grid, AverageMode::Quadratic).unwrap());
    });

    criterion.bench_function("median by hue", |bencher| {
        bencher.iter(|| median_color(&grid).unwrap());
    });

    criterion.bench_function("dominant top 5", |bencher| {
        bencher.iter(|| dominant_colors(&grid, 5).unwrap());
    });
}

fn benchmark_series(criterion: &mut Criterion) {
    let frames: Vec<FrameSource> = (0..24)
        .map(|index| FrameSource::grid(index.to_string(), gradient_frame()))
        .collect();
    let series = FrameSeries::new(ReductionOptions::all().with_dominant_count(5));

    criterion.bench_function("profile 24 frames (sequential)", |bencher| {
        bencher.iter(|| series.profile(&frames).unwrap());
    });

    #[cfg(feature = "rayon")]
    criterion.bench_function("profile 24 frames (parallel)", |bencher| {
        bencher.iter(|| series.profile_parallel(&frames).unwrap());
    });
}

fn benchmark_rendering(criterion: &mut Criterion) {
    let colors: Vec<Color> = (0..1280_u32)
        .map(|index| Color::new((index % 256) as u8, (index / 5 % 256) as u8, 64))
        .collect();
    let palettes: Vec<Vec<Color>> = colors.chunks(5).map(<[Color]>::to_vec).collect();
    let composer = BarcodeComposer::new(BarcodeOptions::new()).unwrap();

    criterion.bench_function("render 1280 line bands", |bencher| {
        bencher.iter(|| composer.render_lines(&colors).unwrap());
    });

    criterion.bench_function("render 256 column bands", |bencher| {
        bencher.iter(|| composer.render_columns(&palettes).unwrap());
    });
}

criterion_group!(
    benches,
    benchmark_reductions,
    benchmark_series,
    benchmark_rendering
);
criterion_main!(benches);
