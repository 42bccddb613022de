use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Value, json};
use spectrafilm::{
    AVERAGE_FILE_NAME, AverageMode, BarcodeOptions, Color, FrameColorProfile, FrameReducer,
    FrameSeries, FrameSource, MEDIAN_FILE_NAME, OperationType, PixelGrid, ProgressCallback,
    ProgressInfo, ReductionOptions, SpectraError, dominant_file_name,
};

const CLI_AFTER_HELP: &str = "Examples:\n  ffmpeg -i movie.mp4 -vf fps=1,scale=-2:480 out/frames/img%06d.png\n  spectrafilm render out/frames --out out --all --mode 5 --progress\n  spectrafilm inspect out/frames/img000042.png --mode 8\n  spectrafilm completions zsh > _spectrafilm";

const SUMMARY_FILE_NAME: &str = "data.json";

#[derive(Debug, Parser)]
#[command(
    name = "spectrafilm",
    version,
    about = "Render colour barcodes from sampled video frames",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional per-frame output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar while frames are reduced.
    #[arg(long)]
    progress: bool,

    /// Allow overwriting existing output files.
    #[arg(long)]
    overwrite: bool,

    /// Desired worker thread count (rayon builds only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Debug, Clone, Default, clap::Args)]
struct MetricFlags {
    /// Generate the average barcode (default when no metric is chosen).
    #[arg(long)]
    avg: bool,

    /// Use the root-mean-square average; implies --avg.
    #[arg(long)]
    avg_square: bool,

    /// Generate the hue-median barcode.
    #[arg(long)]
    median: bool,

    /// Generate the dominant-colour barcode with the top N colours.
    #[arg(long, default_value_t = 0)]
    mode: usize,

    /// Generate every barcode (mode defaults to 1).
    #[arg(long)]
    all: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Profile a directory of frames and write barcodes.
    #[command(
        about = "Render barcodes from a frame directory",
        after_help = "Examples:\n  spectrafilm render out/frames --out out\n  spectrafilm render out/frames --out out --avg-square --median --mode 5 --line-height 2"
    )]
    Render {
        /// Directory holding one image per sampled frame, named in order.
        frames: PathBuf,
        /// Output directory for barcodes and data.json.
        #[arg(long)]
        out: PathBuf,
        /// Width of output images.
        #[arg(long, default_value_t = 720)]
        width: u32,
        /// Height of each frame's line in output images.
        #[arg(long, default_value_t = 1)]
        line_height: u32,
        #[command(flatten)]
        metrics: MetricFlags,
        /// Skip writing data.json.
        #[arg(long)]
        no_json: bool,
    },

    /// Print the colour profile of a single frame.
    #[command(
        about = "Inspect one frame",
        after_help = "Examples:\n  spectrafilm inspect frame.png\n  spectrafilm inspect frame.png --mode 8 --avg-square"
    )]
    Inspect {
        /// Frame image path.
        input: PathBuf,
        /// Number of dominant colours to list.
        #[arg(long, default_value_t = 5)]
        mode: usize,
        /// Use the root-mean-square average.
        #[arg(long)]
        avg_square: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Resolve metric flags the way the original tool did: `--all` turns on
/// everything, and no metric at all falls back to the average.
fn resolve_metrics(flags: &MetricFlags) -> ReductionOptions {
    let mut average = flags.avg || flags.avg_square;
    let mut median = flags.median;
    let mut dominant_count = flags.mode;

    if flags.all {
        average = true;
        median = true;
        dominant_count = dominant_count.max(1);
    }

    if !average && !median && dominant_count == 0 {
        average = true;
    }

    let mode = if flags.avg_square {
        AverageMode::Quadratic
    } else {
        AverageMode::Linear
    };

    let options = ReductionOptions::new()
        .with_median(median)
        .with_dominant_count(dominant_count);
    if average {
        options.with_average(mode)
    } else {
        options.without_average()
    }
}

fn output_files(options: &ReductionOptions, json: bool) -> Vec<String> {
    let mut files = Vec::new();
    if options.average.is_some() {
        files.push(AVERAGE_FILE_NAME.to_string());
    }
    if options.median {
        files.push(MEDIAN_FILE_NAME.to_string());
    }
    if options.dominant_count > 0 {
        files.push(dominant_file_name(options.dominant_count));
    }
    if json {
        files.push(SUMMARY_FILE_NAME.to_string());
    }
    files
}

fn ensure_writable_path(path: &Path, overwrite: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        if overwrite {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("overwriting {}", path.display()).yellow()
            );
        } else {
            return Err(format!(
                "output already exists: {} (use --overwrite to replace)",
                path.display()
            )
            .into());
        }
    }
    Ok(())
}

fn hex_or_null(color: Option<Color>) -> Value {
    color.map_or(Value::Null, |color| Value::String(color.to_string()))
}

/// Summary record for one frame, keyed like the original tool's data.json.
fn profile_json(profile: &FrameColorProfile, frames: &Path, out: &Path) -> Value {
    let frame_path = frames.join(&profile.identifier);
    let display_path = frame_path
        .strip_prefix(out)
        .unwrap_or(frame_path.as_path())
        .to_string_lossy()
        .replace('\\', "/");
    json!({
        "Path": display_path,
        "Average": hex_or_null(profile.average),
        "Median": hex_or_null(profile.median),
        "Mode": profile.dominant_hex(),
    })
}

fn format_palette(colors: &[Color], limit: usize) -> String {
    let mut shown: Vec<String> = colors.iter().take(limit).map(ToString::to_string).collect();
    if colors.len() > limit {
        shown.push("...".to_string());
    }
    shown.join(", ")
}

fn apply_global_options(global: &GlobalOptions) {
    if let Some(threads) = global.threads {
        if threads > 0 {
            unsafe {
                std::env::set_var("RAYON_NUM_THREADS", threads.to_string());
            }
        }
    }

    #[cfg(not(feature = "rayon"))]
    if global.threads.is_some() {
        eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            "--threads requires building with the `rayon` feature".yellow()
        );
    }
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new(frame_count: usize) -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(frame_count as u64);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if info.operation == OperationType::FrameReduction {
            self.bar.set_position(info.current);
            if info.total == Some(info.current) {
                self.bar.finish_with_message("reduced");
            }
        }
    }
}

#[cfg(feature = "rayon")]
fn profile_frames(
    series: &FrameSeries,
    frames: &[FrameSource],
) -> Result<Vec<FrameColorProfile>, SpectraError> {
    series.profile_parallel(frames)
}

#[cfg(not(feature = "rayon"))]
fn profile_frames(
    series: &FrameSeries,
    frames: &[FrameSource],
) -> Result<Vec<FrameColorProfile>, SpectraError> {
    series.profile(frames)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    apply_global_options(&cli.global);

    match cli.command {
        Commands::Render {
            frames,
            out,
            width,
            line_height,
            metrics,
            no_json,
        } => {
            let options = resolve_metrics(&metrics);
            let barcode = BarcodeOptions::new()
                .with_width(width)
                .with_line_height(line_height);
            barcode.validate()?;

            if out.exists() && !out.is_dir() {
                return Err(format!("{} already exists as a file", out.display()).into());
            }
            fs::create_dir_all(&out)?;
            for name in output_files(&options, !no_json) {
                ensure_writable_path(&out.join(name), cli.global.overwrite)?;
            }

            let sources = FrameSource::from_directory(&frames)?;
            if sources.is_empty() {
                return Err(format!("no frames found in {}", frames.display()).into());
            }
            println!("Generating colour data for {} frames...", sources.len());

            let mut series = FrameSeries::new(options);
            if cli.global.progress {
                series = series.with_progress(Arc::new(TerminalProgress::new(sources.len())?));
            }
            let profiles = profile_frames(&series, &sources)?;

            if cli.global.verbose {
                for profile in &profiles {
                    eprintln!("{} >", profile.identifier);
                    if let Some(average) = profile.average {
                        eprintln!("  Average: {average}");
                    }
                    if let Some(median) = profile.median {
                        eprintln!("  Median: {median}");
                    }
                    if !profile.dominant.is_empty() {
                        eprintln!("  Mode: {}", format_palette(&profile.dominant, 5));
                    }
                }
            }

            for path in series.write_barcodes(&profiles, &barcode, &out)? {
                println!("{} {}", "saved".green().bold(), path.display());
            }

            if !no_json {
                let summary: Vec<Value> = profiles
                    .iter()
                    .map(|profile| profile_json(profile, &frames, &out))
                    .collect();
                let path = out.join(SUMMARY_FILE_NAME);
                fs::write(&path, serde_json::to_string_pretty(&summary)?)?;
                println!("{} {}", "saved".green().bold(), path.display());
            }

            println!(
                "{} {}",
                "success:".green().bold(),
                format!("Rendered {} frame(s) to {}", profiles.len(), out.display()).green()
            );
        }
        Commands::Inspect {
            input,
            mode,
            avg_square,
        } => {
            let average = if avg_square {
                AverageMode::Quadratic
            } else {
                AverageMode::Linear
            };
            let options = ReductionOptions::new()
                .with_average(average)
                .with_median(true)
                .with_dominant_count(mode);
            let grid = PixelGrid::open(&input)?;
            let identifier = input.display().to_string();
            let profile = FrameReducer::new(options).reduce(identifier, &grid)?;

            println!("Frame: {} ({}x{})", profile.identifier, grid.width(), grid.height());
            if let Some(average) = profile.average {
                println!("Average: {average}");
            }
            if let Some(median) = profile.median {
                println!("Median: {median}");
            }
            if mode > 0 {
                println!("Mode: {}", format_palette(&profile.dominant, mode));
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "spectrafilm", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use spectrafilm::{AverageMode, Color, FrameColorProfile};

    use super::{MetricFlags, format_palette, output_files, profile_json, resolve_metrics};

    #[test]
    fn no_metric_flags_fall_back_to_average() {
        let options = resolve_metrics(&MetricFlags::default());
        assert_eq!(options.average, Some(AverageMode::Linear));
        assert!(!options.median);
        assert_eq!(options.dominant_count, 0);
    }

    #[test]
    fn all_enables_every_metric_with_one_mode_colour() {
        let options = resolve_metrics(&MetricFlags {
            all: true,
            ..MetricFlags::default()
        });
        assert_eq!(options.average, Some(AverageMode::Linear));
        assert!(options.median);
        assert_eq!(options.dominant_count, 1);

        let options = resolve_metrics(&MetricFlags {
            all: true,
            mode: 6,
            ..MetricFlags::default()
        });
        assert_eq!(options.dominant_count, 6);
    }

    #[test]
    fn avg_square_implies_quadratic_average() {
        let options = resolve_metrics(&MetricFlags {
            avg_square: true,
            median: true,
            ..MetricFlags::default()
        });
        assert_eq!(options.average, Some(AverageMode::Quadratic));
        assert!(options.median);
    }

    #[test]
    fn median_alone_skips_average() {
        let options = resolve_metrics(&MetricFlags {
            median: true,
            ..MetricFlags::default()
        });
        assert_eq!(options.average, None);
        assert_eq!(
            output_files(&options, false),
            vec!["med.png".to_string()]
        );
    }

    #[test]
    fn output_files_follow_metric_order() {
        let options = resolve_metrics(&MetricFlags {
            all: true,
            mode: 3,
            ..MetricFlags::default()
        });
        assert_eq!(
            output_files(&options, true),
            vec!["avg.png", "med.png", "mode_3.png", "data.json"]
        );
    }

    #[test]
    fn profile_json_uses_original_keys_and_relative_path() {
        let profile = FrameColorProfile {
            identifier: "img000001.png".to_string(),
            average: Some(Color::new(255, 0, 16)),
            median: None,
            dominant: vec![Color::new(1, 2, 3)],
        };
        let value = profile_json(&profile, Path::new("out/frames"), Path::new("out"));
        assert_eq!(value["Path"], "frames/img000001.png");
        assert_eq!(value["Average"], "#FF0010");
        assert!(value["Median"].is_null());
        assert_eq!(value["Mode"][0], "#010203");
    }

    #[test]
    fn format_palette_truncates() {
        let colors = vec![Color::BLACK; 7];
        let text = format_palette(&colors, 5);
        assert_eq!(text.matches("#000000").count(), 5);
        assert!(text.ends_with("..."));
    }
}
