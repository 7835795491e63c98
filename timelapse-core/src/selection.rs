//! Frame selection: resolving an explicit rate or a target duration into a
//! concrete set of frame indices and a playback rate.
//!
//! In explicit-rate mode every normalized frame is used. In target-duration
//! mode frames are sampled evenly at a fixed 24 fps baseline; when the
//! requested duration would need more frames than exist, all frames are used
//! and the reported duration differs from the request. That fallback matches
//! the source behavior and is deliberate.

use crate::config::BASELINE_FPS;
use crate::error::{CoreError, CoreResult};

/// How the output frame rate is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateMode {
    /// Caller supplied the output frame rate directly; all frames are used.
    ExplicitFps(f64),
    /// Caller supplied a target duration; frames are sampled at the
    /// 24 fps baseline to approximate it.
    TargetDuration(f64),
}

impl RateMode {
    /// Resolves the optional fps/seconds pair into a rate mode.
    ///
    /// Explicit fps takes precedence when both are given. Neither given is
    /// a missing-parameter error; non-positive values are rejected here so
    /// no external process is ever spawned for bad parameters.
    pub fn from_options(fps: Option<f64>, seconds: Option<f64>) -> CoreResult<Self> {
        match (fps, seconds) {
            (Some(fps), _) => {
                if fps > 0.0 && fps.is_finite() {
                    Ok(Self::ExplicitFps(fps))
                } else {
                    Err(CoreError::InvalidParameter(format!(
                        "fps must be a positive number (got {fps})"
                    )))
                }
            }
            (None, Some(seconds)) => {
                if seconds > 0.0 && seconds.is_finite() {
                    Ok(Self::TargetDuration(seconds))
                } else {
                    Err(CoreError::InvalidParameter(format!(
                        "seconds must be > 0 (got {seconds})"
                    )))
                }
            }
            (None, None) => Err(CoreError::InvalidParameter(
                "either an explicit fps or a target duration in seconds is required".to_string(),
            )),
        }
    }
}

/// The subsequence of normalized frames chosen for encoding.
///
/// `indices` refer to positions in the normalized frame list, preserve
/// temporal order, contain no duplicates, and are never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSelection {
    pub indices: Vec<usize>,
    pub target_fps: f64,
    /// True when target-duration mode actually dropped frames.
    pub sampled: bool,
}

impl FrameSelection {
    /// Number of selected frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.indices.len()
    }

    /// Estimated output duration in seconds. Reporting only; the encoder is
    /// not held to this.
    #[must_use]
    pub fn estimated_duration(&self) -> f64 {
        self.indices.len() as f64 / self.target_fps
    }
}

/// Selects which normalized frames to encode and at what rate.
///
/// # Arguments
///
/// * `total_frames` - Number of normalized frames available (> 0)
/// * `mode` - Resolved rate mode
///
/// # Errors
///
/// * `CoreError::InvalidParameter` - If a target duration synthesizes a
///   non-positive frame count
pub fn select_frames(total_frames: usize, mode: RateMode) -> CoreResult<FrameSelection> {
    match mode {
        RateMode::ExplicitFps(fps) => Ok(FrameSelection {
            indices: (0..total_frames).collect(),
            target_fps: fps,
            sampled: false,
        }),
        RateMode::TargetDuration(seconds) => {
            let desired = (seconds * BASELINE_FPS) as i64;
            if desired <= 0 {
                return Err(CoreError::InvalidParameter(format!(
                    "target duration of {seconds}s yields no frames at {BASELINE_FPS} fps"
                )));
            }
            let desired = desired as usize;

            let indices: Vec<usize> = if desired >= total_frames {
                // Fewer frames than the duration calls for: use everything.
                // The resulting duration is total/24, not the request.
                (0..total_frames).collect()
            } else {
                let step = total_frames as f64 / desired as f64;
                (0..desired).map(|i| (i as f64 * step) as usize).collect()
            };

            Ok(FrameSelection {
                sampled: indices.len() < total_frames,
                indices,
                target_fps: BASELINE_FPS,
            })
        }
    }
}
