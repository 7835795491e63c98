// timelapse-cli/src/main.rs
//
// Command-line interface for the timelapse pipeline. Parses arguments,
// validates the input, prints a pre-encode summary, asks for confirmation,
// and renders encode progress as a frame-count bar. A declined confirmation
// exits 0; input errors, parameter errors, and encoder failures exit 1.

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use timelapse_core::{CoreConfig, plan_timelapse};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Build a timelapse video from an image sequence with ffmpeg",
    long_about = "Builds a timelapse video from a directory of still images.\n\
                  Source images are made upright from their EXIF orientation, \
                  evenly sampled when a target duration is given, and encoded \
                  with ffmpeg, with optional soundtrack muxing."
)]
struct Cli {
    /// Directory containing the image sequence
    #[arg(short = 'i', long, value_name = "DIR")]
    input_path: PathBuf,

    /// Output video file, e.g. timelapse.mp4
    #[arg(short = 'o', long, value_name = "FILE")]
    output_video: PathBuf,

    /// Exact frames per second (float allowed)
    #[arg(short, long, value_name = "FPS")]
    fps: Option<f64>,

    /// Target video duration in seconds (used when --fps is not given)
    #[arg(short, long, value_name = "SECONDS")]
    seconds: Option<f64>,

    /// FFmpeg video codec (libx264, libx265, libsvtav1, ...)
    #[arg(long, default_value = timelapse_core::DEFAULT_CODEC)]
    codec: String,

    /// Constant Rate Factor (0-51, lower = better quality)
    #[arg(
        long,
        default_value_t = timelapse_core::DEFAULT_CRF,
        value_parser = clap::value_parser!(u32).range(0..=51)
    )]
    crf: u32,

    /// Optional audio file to add as soundtrack
    #[arg(short, long, value_name = "FILE")]
    audio: Option<PathBuf>,
}

/// True when a confirmation response means "don't encode".
fn is_negative(response: &str) -> bool {
    matches!(response.trim().to_lowercase().as_str(), "n" | "no")
}

/// Prompts on stdout and reads one line from stdin.
fn confirm_encode() -> std::io::Result<bool> {
    print!("Proceed? [Y/n]: ");
    std::io::stdout().flush()?;
    let mut response = String::new();
    std::io::stdin().read_line(&mut response)?;
    Ok(!is_negative(&response))
}

fn encoding_progress_bar(total_frames: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_frames);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Encoding: {pos:>6}/{len:6} frames [{bar:30}] ({elapsed} / {duration})")
            .unwrap()
            .progress_chars("##."),
    );
    pb
}

fn run_timelapse(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CoreConfig::new(cli.input_path, cli.output_video);
    config.fps = cli.fps;
    config.seconds = cli.seconds;
    config.codec = cli.codec;
    config.crf = cli.crf;
    config.audio_path = cli.audio;

    let plan = plan_timelapse(&config)?;
    let (width, height) = plan.resolution();

    println!("{} {} images", style("Found       :").bold(), plan.total_images());
    println!("{} {} x {}", style("Resolution  :").bold(), width, height);
    if let Some(audio) = &config.audio_path {
        println!("{} {}", style("Audio track :").bold(), audio.display());
    }
    println!("{} {}", style("Output file :").bold(), config.output_path.display());
    println!("{} {} (CRF {})", style("Codec       :").bold(), config.codec, config.crf);
    println!("{} {}", style("Frames      :").bold(), plan.frame_count());
    println!("{} {:.3}", style("Target FPS  :").bold(), plan.target_fps());
    println!(
        "{} {:.2} seconds\n",
        style("Duration    :").bold(),
        plan.estimated_duration()
    );

    if !confirm_encode()? {
        println!("Aborted.");
        return Ok(());
    }

    let pb = encoding_progress_bar(plan.frame_count() as u64);
    plan.encode(&config, &mut |state| {
        // Counts arrive clamped and monotone from the progress monitor.
        pb.set_position(state.completed_frames);
    })?;
    pb.finish();

    let final_path = std::fs::canonicalize(&config.output_path)
        .unwrap_or_else(|_| config.output_path.clone());
    println!("\n{} Done -> {}", style("✓").green().bold(), final_path.display());
    debug!("output written to {}", final_path.display());

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run_timelapse(cli) {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_args() {
        let args = vec![
            "timelapse",
            "--input-path",
            "photos",
            "--output-video",
            "out.mp4",
            "--seconds",
            "10",
        ];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.input_path, PathBuf::from("photos"));
        assert_eq!(cli.output_video, PathBuf::from("out.mp4"));
        assert_eq!(cli.seconds, Some(10.0));
        assert!(cli.fps.is_none());
        assert_eq!(cli.codec, "libx264");
        assert_eq!(cli.crf, 20);
        assert!(cli.audio.is_none());
    }

    #[test]
    fn test_parse_short_flags_and_audio() {
        let args = vec![
            "timelapse",
            "-i", "photos",
            "-o", "out.mp4",
            "-f", "29.97",
            "-a", "track.mp3",
            "--codec", "libx265",
            "--crf", "28",
        ];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.fps, Some(29.97));
        assert_eq!(cli.audio, Some(PathBuf::from("track.mp3")));
        assert_eq!(cli.codec, "libx265");
        assert_eq!(cli.crf, 28);
    }

    #[test]
    fn test_parse_rejects_out_of_range_crf() {
        let args = vec![
            "timelapse",
            "-i", "photos",
            "-o", "out.mp4",
            "--crf", "52",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_negative_confirmation_responses() {
        assert!(is_negative("n"));
        assert!(is_negative("no"));
        assert!(is_negative("  N\n"));
        assert!(is_negative("NO"));
        assert!(!is_negative(""));
        assert!(!is_negative("y"));
        assert!(!is_negative("yes"));
        assert!(!is_negative("whatever"));
    }
}
