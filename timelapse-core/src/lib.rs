//! Core library for building timelapse videos from image sequences with ffmpeg.
//!
//! This crate provides image discovery, EXIF orientation normalization,
//! frame selection, concat manifest building, and ffmpeg encode
//! orchestration with live progress monitoring.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use timelapse_core::{CoreConfig, plan_timelapse};
//! use std::path::PathBuf;
//!
//! let mut config = CoreConfig::new(
//!     PathBuf::from("/path/to/photos"),
//!     PathBuf::from("timelapse.mp4"),
//! );
//! config.seconds = Some(10.0);
//!
//! let plan = plan_timelapse(&config).unwrap();
//! println!("{} frames at {} fps", plan.frame_count(), plan.target_fps());
//!
//! plan.encode(&config, &mut |state| {
//!     println!("{}/{}", state.completed_frames, state.total_frames);
//! })
//! .unwrap();
//! ```

pub mod config;
pub mod discovery;
pub mod encode;
pub mod error;
pub mod manifest;
pub mod orientation;
pub mod pipeline;
pub mod progress;
pub mod selection;
pub mod temp_files;

// Re-exports for public API
pub use config::{BASELINE_FPS, CoreConfig, DEFAULT_CODEC, DEFAULT_CRF, MAX_CRF};
pub use discovery::{SourceImage, find_source_images};
pub use error::{CoreError, CoreResult};
pub use orientation::NormalizedFrame;
pub use pipeline::{TimelapsePlan, plan_timelapse};
pub use progress::ProgressState;
pub use selection::{FrameSelection, RateMode, select_frames};
