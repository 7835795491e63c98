//! Configuration structures and constants for the timelapse pipeline.
//!
//! Instances of [`CoreConfig`] are created by consumers of the library (like
//! timelapse-cli) and passed to [`crate::plan_timelapse`] to control the run.

use crate::error::{CoreError, CoreResult};
use std::path::PathBuf;

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Default video codec handed to ffmpeg. H.264 for broad player support.
pub const DEFAULT_CODEC: &str = "libx264";

/// Default CRF (Constant Rate Factor) quality value.
/// Range: 0-51, lower values produce higher quality but larger files.
pub const DEFAULT_CRF: u32 = 20;

/// Maximum accepted CRF value.
pub const MAX_CRF: u32 = 51;

/// Baseline playback rate used when the caller gives a target duration
/// instead of an explicit frame rate.
pub const BASELINE_FPS: f64 = 24.0;

/// Pixel format for the output video. 4:2:0 chroma subsampling keeps the
/// result playable in common players.
pub const PIXEL_FORMAT: &str = "yuv420p";

/// AAC bitrate used when an audio track is muxed in.
pub const AUDIO_BITRATE: &str = "192k";

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Main configuration for one timelapse run.
///
/// Exactly one of `fps` or `seconds` must be set; when both are present the
/// explicit frame rate wins (see [`crate::selection::RateMode`]).
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory containing the source image sequence.
    pub input_dir: PathBuf,
    /// Path of the output video file. Overwritten if it exists.
    pub output_path: PathBuf,
    /// Explicit output frame rate (float allowed).
    pub fps: Option<f64>,
    /// Target video duration in seconds, sampled at [`BASELINE_FPS`].
    pub seconds: Option<f64>,
    /// ffmpeg video codec identifier.
    pub codec: String,
    /// Constant Rate Factor, 0-51.
    pub crf: u32,
    /// Optional audio track to mux in.
    pub audio_path: Option<PathBuf>,
}

impl CoreConfig {
    /// Creates a configuration with default codec and quality.
    #[must_use]
    pub fn new(input_dir: PathBuf, output_path: PathBuf) -> Self {
        Self {
            input_dir,
            output_path,
            fps: None,
            seconds: None,
            codec: DEFAULT_CODEC.to_string(),
            crf: DEFAULT_CRF,
            audio_path: None,
        }
    }

    /// Validates the configuration before any work is done.
    ///
    /// Checks that the input path is an existing directory, that a rate mode
    /// can be resolved, and that the CRF is in range. All of these are input
    /// errors and fail before any external process is spawned.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.input_dir.is_dir() {
            return Err(CoreError::NotADirectory(
                self.input_dir.display().to_string(),
            ));
        }
        if self.crf > MAX_CRF {
            return Err(CoreError::InvalidParameter(format!(
                "crf must be between 0 and {MAX_CRF} (got {})",
                self.crf
            )));
        }
        // Resolving the rate mode performs the fps/seconds checks.
        crate::selection::RateMode::from_options(self.fps, self.seconds)?;
        if let Some(audio) = &self.audio_path {
            if !audio.is_file() {
                return Err(CoreError::InvalidParameter(format!(
                    "audio track not found: {}",
                    audio.display()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_rate_mode() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig::new(dir.path().to_path_buf(), PathBuf::from("out.mp4"));
        let result = config.validate();
        assert!(matches!(result, Err(CoreError::InvalidParameter(_))));
    }

    #[test]
    fn test_validate_rejects_out_of_range_crf() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CoreConfig::new(dir.path().to_path_buf(), PathBuf::from("out.mp4"));
        config.fps = Some(30.0);
        config.crf = 52;
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_validate_rejects_missing_input_dir() {
        let mut config = CoreConfig::new(
            PathBuf::from("surely_this_does_not_exist_42"),
            PathBuf::from("out.mp4"),
        );
        config.fps = Some(24.0);
        assert!(matches!(config.validate(), Err(CoreError::NotADirectory(_))));
    }
}
