// timelapse-core/tests/orientation_tests.rs

use image::RgbImage;
use tempfile::tempdir;
use timelapse_core::discovery::find_source_images;
use timelapse_core::orientation::normalize_images;

/// Writes a small solid-color PNG. PNGs carry no EXIF container, so these
/// always take the copy-unchanged path.
fn write_png(path: &std::path::Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, image::Rgb([10, 20, 30]))
        .save(path)
        .unwrap();
}

#[test]
fn test_normalize_copies_untagged_images_byte_identical() -> Result<(), Box<dyn std::error::Error>>
{
    let input = tempdir()?;
    let scratch = tempdir()?;

    write_png(&input.path().join("one.png"), 6, 4);
    write_png(&input.path().join("two.png"), 6, 4);

    let images = find_source_images(input.path())?;
    let frames = normalize_images(&images, scratch.path())?;

    assert_eq!(frames.len(), 2);
    for (frame, source) in frames.iter().zip(&images) {
        assert_eq!(frame.width, 6);
        assert_eq!(frame.height, 4);
        // No orientation metadata: the copy is byte-identical.
        assert_eq!(
            std::fs::read(&frame.scratch_path)?,
            std::fs::read(&source.path)?
        );
    }

    Ok(())
}

#[test]
fn test_normalize_names_frames_sequentially() -> Result<(), Box<dyn std::error::Error>> {
    let input = tempdir()?;
    let scratch = tempdir()?;

    // Deliberately unsorted creation order; discovery sorts by path.
    write_png(&input.path().join("c.png"), 2, 2);
    write_png(&input.path().join("a.png"), 2, 2);
    write_png(&input.path().join("b.png"), 2, 2);

    let images = find_source_images(input.path())?;
    let frames = normalize_images(&images, scratch.path())?;

    let names: Vec<_> = frames
        .iter()
        .map(|f| {
            f.scratch_path
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert_eq!(names, vec!["frame_00000.png", "frame_00001.png", "frame_00002.png"]);

    Ok(())
}

#[test]
fn test_scratch_cleanup_on_drop() -> Result<(), Box<dyn std::error::Error>> {
    let input = tempdir()?;
    write_png(&input.path().join("a.png"), 2, 2);
    let images = find_source_images(input.path())?;

    let scratch = timelapse_core::temp_files::create_scratch_dir()?;
    let scratch_path = scratch.path().to_path_buf();
    normalize_images(&images, scratch.path())?;
    assert!(scratch_path.join("frame_00000.png").exists());

    drop(scratch);
    assert!(!scratch_path.exists());

    Ok(())
}
