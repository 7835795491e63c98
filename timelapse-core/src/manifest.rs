//! Concat manifest building.
//!
//! ffmpeg's concat demuxer takes a text file listing the frames to encode,
//! one `file '<path>'` line per frame, in encode order. The manifest is a
//! transient artifact: written fresh into scratch storage for each run and
//! removed with it.

use crate::error::CoreResult;
use crate::orientation::NormalizedFrame;
use crate::selection::FrameSelection;

use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the manifest inside the scratch directory.
const MANIFEST_NAME: &str = "frames.txt";

/// Writes the concat manifest for the selected frames.
///
/// Entries use absolute scratch paths so the encoder's working directory
/// does not matter.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written manifest
pub fn write_concat_manifest(
    frames: &[NormalizedFrame],
    selection: &FrameSelection,
    scratch_dir: &Path,
) -> CoreResult<PathBuf> {
    let manifest_path = scratch_dir.join(MANIFEST_NAME);
    let mut file = std::io::BufWriter::new(std::fs::File::create(&manifest_path)?);

    for &index in &selection.indices {
        writeln!(file, "file '{}'", frames[index].scratch_path.display())?;
    }
    file.flush()?;

    Ok(manifest_path)
}
