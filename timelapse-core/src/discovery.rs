//! Image discovery module for finding source frames to process.
//!
//! Scans the top level of the input directory for still-image files
//! (jpg/jpeg/png/tif/tiff, case-insensitive) and returns them in
//! lexicographic path order. Subdirectories are not searched.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Image file extensions eligible for inclusion in a timelapse.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "tif", "tiff"];

/// One input file, in enumeration order.
///
/// Immutable once discovered; `sequence_index` is the position in the
/// lexicographically sorted listing and drives scratch frame naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub path: PathBuf,
    pub sequence_index: usize,
}

/// Returns true if the path has one of the recognized image extensions.
#[must_use]
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext_str| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext_str.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Finds image files eligible for processing in the specified directory.
///
/// # Returns
///
/// * `Ok(Vec<SourceImage>)` - The sorted source images
/// * `Err(CoreError::NoImagesFound)` - If no matching files are found
/// * `Err(CoreError::Io)` - If the directory cannot be read
pub fn find_source_images(input_dir: &Path) -> CoreResult<Vec<SourceImage>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let mut paths: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if path.is_file() && is_image_file(&path) {
                Some(path)
            } else {
                None
            }
        })
        .collect();

    if paths.is_empty() {
        return Err(CoreError::NoImagesFound(input_dir.display().to_string()));
    }

    paths.sort();

    Ok(paths
        .into_iter()
        .enumerate()
        .map(|(sequence_index, path)| SourceImage {
            path,
            sequence_index,
        })
        .collect())
}
