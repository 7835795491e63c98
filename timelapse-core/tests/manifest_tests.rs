// timelapse-core/tests/manifest_tests.rs

use std::path::PathBuf;
use tempfile::tempdir;
use timelapse_core::manifest::write_concat_manifest;
use timelapse_core::orientation::NormalizedFrame;
use timelapse_core::selection::{RateMode, select_frames};

fn frame(path: &str) -> NormalizedFrame {
    NormalizedFrame {
        scratch_path: PathBuf::from(path),
        width: 640,
        height: 480,
    }
}

#[test]
fn test_manifest_lists_selected_frames_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let scratch = tempdir()?;
    let frames = vec![
        frame("/scratch/frame_00000.jpg"),
        frame("/scratch/frame_00001.jpg"),
        frame("/scratch/frame_00002.jpg"),
        frame("/scratch/frame_00003.jpg"),
    ];
    // floor(0.1 * 24) = 2 frames out of 4, step 2.
    let selection = select_frames(4, RateMode::TargetDuration(0.1))?;
    assert_eq!(selection.indices, vec![0, 2]);

    let manifest_path = write_concat_manifest(&frames, &selection, scratch.path())?;
    let contents = std::fs::read_to_string(&manifest_path)?;

    assert_eq!(
        contents,
        "file '/scratch/frame_00000.jpg'\nfile '/scratch/frame_00002.jpg'\n"
    );

    Ok(())
}

#[test]
fn test_manifest_lives_in_scratch() -> Result<(), Box<dyn std::error::Error>> {
    let scratch = tempdir()?;
    let frames = vec![frame("/scratch/frame_00000.png")];
    let selection = select_frames(1, RateMode::ExplicitFps(24.0))?;

    let manifest_path = write_concat_manifest(&frames, &selection, scratch.path())?;
    assert!(manifest_path.starts_with(scratch.path()));

    Ok(())
}
