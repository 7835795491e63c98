// timelapse-core/tests/discovery_tests.rs

use std::fs::{self, File};
use std::path::PathBuf;
use tempfile::tempdir;
use timelapse_core::discovery::find_source_images;
use timelapse_core::error::CoreError;

#[test]
fn test_find_source_images_filters_and_sorts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_dir = dir.path();

    File::create(input_dir.join("b.jpg"))?;
    File::create(input_dir.join("a.PNG"))?; // Case insensitivity
    File::create(input_dir.join("c.tiff"))?;
    File::create(input_dir.join("d.jpeg"))?;
    File::create(input_dir.join("e.tif"))?;
    File::create(input_dir.join("notes.txt"))?;
    File::create(input_dir.join("clip.mp4"))?;
    fs::create_dir(input_dir.join("subdir"))?;
    File::create(input_dir.join("subdir").join("nested.jpg"))?; // Not searched

    let images = find_source_images(input_dir)?;

    let names: Vec<_> = images
        .iter()
        .map(|img| img.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.PNG", "b.jpg", "c.tiff", "d.jpeg", "e.tif"]);

    // Sequence indices follow the sorted order
    for (i, img) in images.iter().enumerate() {
        assert_eq!(img.sequence_index, i);
    }

    dir.close()?;
    Ok(())
}

#[test]
fn test_find_source_images_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("document.txt"))?;

    let result = find_source_images(dir.path());
    assert!(result.is_err());
    match result.err().unwrap() {
        CoreError::NoImagesFound(_) => {} // Expected error
        e => panic!("Unexpected error type: {:?}", e),
    }

    dir.close()?;
    Ok(())
}

#[test]
fn test_find_source_images_nonexistent_dir() {
    let non_existent_path = PathBuf::from("surely_this_does_not_exist_42_integration");
    let result = find_source_images(&non_existent_path);
    assert!(result.is_err());
    match result.err().unwrap() {
        CoreError::Io(_) => {} // Expected error type
        e => panic!("Unexpected error type: {:?}", e),
    }
}
