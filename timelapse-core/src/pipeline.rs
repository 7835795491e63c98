//! Pipeline orchestration: normalize, select, build manifest, encode.
//!
//! The run is split in two so callers can show a summary and ask for
//! confirmation before the encoder is spawned: [`plan_timelapse`] performs
//! every synchronous stage and returns a [`TimelapsePlan`], and
//! [`TimelapsePlan::encode`] performs the external encode. The plan owns
//! the scratch directory, so dropping it (confirmed or not, success or
//! failure) removes all intermediate artifacts.

use crate::config::{CoreConfig, PIXEL_FORMAT};
use crate::discovery::find_source_images;
use crate::encode::{EncodeJob, run_encode};
use crate::error::CoreResult;
use crate::manifest::write_concat_manifest;
use crate::orientation::{NormalizedFrame, normalize_images};
use crate::progress::ProgressState;
use crate::selection::{FrameSelection, RateMode, select_frames};
use crate::temp_files::create_scratch_dir;

use log::info;
use tempfile::TempDir;

/// A fully prepared run, one external encode away from the output file.
#[derive(Debug)]
pub struct TimelapsePlan {
    // Keeps the normalized frames and manifest alive until the plan drops.
    scratch: TempDir,
    frames: Vec<NormalizedFrame>,
    selection: FrameSelection,
    total_images: usize,
}

/// Runs the synchronous pipeline stages.
///
/// Validates the configuration, discovers the source images, writes upright
/// copies into scratch storage, and resolves the frame selection. No
/// external process is spawned here.
pub fn plan_timelapse(config: &CoreConfig) -> CoreResult<TimelapsePlan> {
    config.validate()?;
    let mode = RateMode::from_options(config.fps, config.seconds)?;

    let images = find_source_images(&config.input_dir)?;
    info!("Found {} source images in {}", images.len(), config.input_dir.display());

    let scratch = create_scratch_dir()?;
    let frames = normalize_images(&images, scratch.path())?;

    let selection = select_frames(frames.len(), mode)?;
    if selection.sampled {
        info!(
            "Sampling {}->{} frames for {:.3}s at {} fps",
            frames.len(),
            selection.frame_count(),
            selection.estimated_duration(),
            selection.target_fps
        );
    }

    Ok(TimelapsePlan {
        scratch,
        total_images: images.len(),
        frames,
        selection,
    })
}

impl TimelapsePlan {
    /// Number of source images discovered.
    #[must_use]
    pub fn total_images(&self) -> usize {
        self.total_images
    }

    /// Number of frames that will be encoded.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.selection.frame_count()
    }

    /// Output frame rate.
    #[must_use]
    pub fn target_fps(&self) -> f64 {
        self.selection.target_fps
    }

    /// Estimated output duration in seconds (reporting only).
    #[must_use]
    pub fn estimated_duration(&self) -> f64 {
        self.selection.estimated_duration()
    }

    /// Resolution of the first normalized frame.
    #[must_use]
    pub fn resolution(&self) -> (u32, u32) {
        (self.frames[0].width, self.frames[0].height)
    }

    /// Writes the concat manifest and runs the external encode.
    ///
    /// `on_progress` receives clamped, monotone frame counts while ffmpeg
    /// runs; see [`crate::progress`]. A nonzero encoder exit aborts the run
    /// with the captured diagnostics.
    pub fn encode(
        &self,
        config: &CoreConfig,
        on_progress: &mut dyn FnMut(ProgressState),
    ) -> CoreResult<()> {
        let manifest_path =
            write_concat_manifest(&self.frames, &self.selection, self.scratch.path())?;

        let job = EncodeJob {
            manifest_path,
            audio_path: config.audio_path.clone(),
            codec: config.codec.clone(),
            crf: config.crf,
            pixel_format: PIXEL_FORMAT.to_string(),
            fps: self.selection.target_fps,
            output_path: config.output_path.clone(),
        };

        run_encode(&job, self.frame_count() as u64, on_progress)
    }
}
