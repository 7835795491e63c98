//! Progress monitoring of the encoder's progress channel.
//!
//! ffmpeg is asked to write a machine-readable `key=value` status stream to
//! its stdout (`-progress pipe:1`). A dedicated thread owns that handle for
//! the lifetime of exactly one child process, parses the `frame=` lines,
//! and forwards clamped counts to the coordinating flow over a channel.

use log::info;

use std::io::{BufRead, BufReader, Read};
use std::sync::mpsc::Sender;

/// Snapshot of encode completion, clamped to the selected frame count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    pub completed_frames: u64,
    pub total_frames: u64,
}

impl ProgressState {
    /// Completion as a percentage in `[0, 100]`.
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total_frames == 0 {
            return 100.0;
        }
        self.completed_frames as f64 / self.total_frames as f64 * 100.0
    }
}

/// Parses one progress-channel line.
///
/// Only `frame=<n>` lines carry state we care about; every other key is
/// ignored.
fn parse_frame_line(line: &str) -> Option<u64> {
    line.strip_prefix("frame=")?.trim().parse().ok()
}

/// Reads the progress channel to EOF, forwarding frame counts.
///
/// Counts are clamped to `[0, total_frames]` and kept monotone
/// non-decreasing. Blank lines mid-stream are transient and skipped; the
/// child closing its end of the pipe (EOF) terminates the loop. Send
/// failures mean the coordinating flow has gone away, at which point the
/// stream is simply drained.
pub fn monitor_progress<R: Read>(reader: R, total_frames: u64, updates: &Sender<ProgressState>) {
    let mut completed = 0u64;
    let mut last_logged_threshold = -1i64;

    for line in BufReader::new(reader).lines() {
        let Ok(line) = line else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(frames) = parse_frame_line(line) else {
            continue;
        };
        completed = frames.min(total_frames).max(completed);

        let state = ProgressState {
            completed_frames: completed,
            total_frames,
        };
        let _ = updates.send(state);

        // Throttled log line for non-interactive consumers.
        let threshold = (state.percent() as i64 / 10) * 10;
        if threshold > last_logged_threshold {
            info!(
                target: "timelapse::progress",
                "Encoding progress: {}/{} frames ({:.0}%)",
                completed, total_frames, state.percent()
            );
            last_logged_threshold = threshold;
        }
    }
}
