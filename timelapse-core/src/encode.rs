//! FFmpeg command building and execution for the timelapse encode.
//!
//! Builds the concat-demuxer invocation for the selected frames, spawns
//! ffmpeg as a child process, and owns its lifetime: stdout is handed to
//! the progress monitor thread, stderr is collected for diagnostics, and a
//! nonzero exit status is fatal for the whole pipeline. External encoders
//! are assumed to fail deterministically on bad input, so there are no
//! retries.

use crate::config::AUDIO_BITRATE;
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::progress::{ProgressState, monitor_progress};

use ffmpeg_sidecar::command::FfmpegCommand;
use log::{debug, warn};

use std::io::Read;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

/// Parameters and external references for one encoder invocation.
///
/// Exactly one per pipeline run.
#[derive(Debug, Clone)]
pub struct EncodeJob {
    pub manifest_path: PathBuf,
    pub audio_path: Option<PathBuf>,
    pub codec: String,
    pub crf: u32,
    pub pixel_format: String,
    pub fps: f64,
    pub output_path: PathBuf,
}

/// Builds the ffmpeg command for an encode job.
///
/// The manifest is read as a concatenated image sequence (`-f concat`).
/// With an audio track, AAC at a fixed bitrate is muxed in and `-shortest`
/// truncates the output at the shorter stream. Progress goes to stdout as a
/// `key=value` stream while `-nostats -loglevel error` keeps incidental log
/// noise off both channels; an existing output file is overwritten.
#[must_use]
pub fn build_ffmpeg_command(job: &EncodeJob) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();

    cmd.hide_banner();
    cmd.args(["-f", "concat", "-safe", "0"]);
    cmd.input(job.manifest_path.to_string_lossy().as_ref());

    if let Some(audio) = &job.audio_path {
        cmd.input(audio.to_string_lossy().as_ref());
    }

    cmd.args(["-c:v", &job.codec]);
    cmd.args(["-crf", &job.crf.to_string()]);
    cmd.args(["-pix_fmt", &job.pixel_format]);
    cmd.args(["-r", &job.fps.to_string()]);

    if job.audio_path.is_some() {
        cmd.args(["-c:a", "aac"]);
        cmd.args(["-b:a", AUDIO_BITRATE]);
        cmd.arg("-shortest");
    }

    cmd.args(["-progress", "pipe:1", "-nostats"]);
    cmd.args(["-loglevel", "error"]);
    cmd.overwrite();
    cmd.output(job.output_path.to_string_lossy().as_ref());

    cmd
}

/// Executes an ffmpeg encode, reporting progress through `on_progress`.
///
/// A dedicated thread exclusively owns the child's stdout and forwards
/// clamped frame counts over a channel; this function drains that channel,
/// so `on_progress` runs on the calling thread. After the child exits,
/// remaining stderr text is read: on success it is surfaced as a warning,
/// on failure it becomes part of the returned error.
pub fn run_encode(
    job: &EncodeJob,
    total_frames: u64,
    on_progress: &mut dyn FnMut(ProgressState),
) -> CoreResult<()> {
    let mut cmd = build_ffmpeg_command(job);
    debug!("ffmpeg command: {cmd:?}");

    let mut child = cmd.spawn().map_err(|e| CoreError::CommandStart {
        cmd: "ffmpeg".to_string(),
        message: e.to_string(),
    })?;

    let stdout = child.take_stdout().ok_or_else(|| {
        CoreError::Other("ffmpeg progress channel was not captured".to_string())
    })?;

    let (tx, rx) = mpsc::channel();
    let monitor = thread::spawn(move || monitor_progress(stdout, total_frames, &tx));

    // The channel closes when the monitor hits EOF on the progress stream,
    // which happens as the child exits.
    for state in rx {
        on_progress(state);
    }
    monitor
        .join()
        .map_err(|_| CoreError::Other("progress monitor thread panicked".to_string()))?;

    let mut stderr_text = String::new();
    if let Some(mut stderr) = child.take_stderr() {
        let _ = stderr.read_to_string(&mut stderr_text);
    }

    let status = child.wait()?;

    if status.success() {
        if !stderr_text.trim().is_empty() {
            warn!("ffmpeg diagnostics:\n{}", stderr_text.trim());
        }
        on_progress(ProgressState {
            completed_frames: total_frames,
            total_frames,
        });
        Ok(())
    } else {
        Err(command_failed_error(
            "ffmpeg",
            status,
            stderr_text.trim().to_string(),
        ))
    }
}
