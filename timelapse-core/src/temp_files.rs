//! Scratch storage for intermediate pipeline artifacts.
//!
//! Normalized frames and the concat manifest live in a process-scoped
//! temporary directory. Cleanup is handled by the tempfile crate's Drop
//! implementation, so the scratch area is removed on both success and
//! failure exit paths.

use crate::error::CoreResult;
use tempfile::{Builder as TempFileBuilder, TempDir};

/// Prefix for the per-run scratch directory.
const SCRATCH_PREFIX: &str = "timelapse_frames_";

/// Creates the scratch directory for one pipeline run. Auto-cleaned when dropped.
///
/// The directory is exclusively owned by the run that created it; concurrent
/// runs each get their own.
pub fn create_scratch_dir() -> CoreResult<TempDir> {
    Ok(TempFileBuilder::new().prefix(SCRATCH_PREFIX).tempdir()?)
}
