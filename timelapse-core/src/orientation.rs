//! Orientation normalization of source images.
//!
//! Cameras record the sensor rotation in an EXIF orientation tag instead of
//! rotating the pixels. ffmpeg's concat demuxer ignores that tag, so each
//! source image is rewritten upright into scratch storage before encoding.
//! The eight standard orientation codes map through a fixed lookup table;
//! any missing, unreadable, or out-of-range tag falls back to copying the
//! file unchanged and never aborts the run.

use crate::discovery::SourceImage;
use crate::error::{CoreError, CoreResult};

use image::DynamicImage;
use log::debug;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// One upright frame in scratch storage.
///
/// Written once by the normalizer and read-only afterward; deleted with the
/// scratch directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFrame {
    pub scratch_path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Geometric correction needed to display an image upright.
///
/// Rotations are clockwise in source-pixel space; flips are applied before
/// the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    None,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    FlipHorizontalRotate90,
    Rotate90,
    FlipHorizontalRotate270,
    Rotate270,
}

/// Maps an EXIF orientation code to its corrective transform.
///
/// Code 1 is upright already; anything outside 1-8 is treated the same way.
#[must_use]
pub fn correction_for_code(code: u32) -> Correction {
    match code {
        2 => Correction::FlipHorizontal,
        3 => Correction::Rotate180,
        4 => Correction::FlipVertical,
        5 => Correction::FlipHorizontalRotate90,
        6 => Correction::Rotate90,
        7 => Correction::FlipHorizontalRotate270,
        8 => Correction::Rotate270,
        _ => Correction::None,
    }
}

/// Applies a corrective transform to a decoded image.
#[must_use]
pub fn apply_correction(img: DynamicImage, correction: Correction) -> DynamicImage {
    match correction {
        Correction::None => img,
        Correction::FlipHorizontal => img.fliph(),
        Correction::Rotate180 => img.rotate180(),
        Correction::FlipVertical => img.flipv(),
        Correction::FlipHorizontalRotate90 => img.fliph().rotate90(),
        Correction::Rotate90 => img.rotate90(),
        Correction::FlipHorizontalRotate270 => img.fliph().rotate270(),
        Correction::Rotate270 => img.rotate270(),
    }
}

/// Reads the raw EXIF orientation code from an image file.
///
/// Returns `None` when the file has no EXIF container, no orientation tag,
/// or the tag cannot be parsed. Callers treat all of those as "no
/// correction".
#[must_use]
pub fn read_orientation_code(path: &Path) -> Option<u32> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut reader).ok()?;
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
}

/// Builds the scratch file name for one frame.
///
/// Zero-padded to five digits so lexicographic and numeric order coincide;
/// the original extension is preserved.
fn scratch_file_name(sequence_index: usize, source_path: &Path) -> String {
    let ext = source_path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("frame_{sequence_index:05}.{ext}")
}

/// Writes an upright copy of every source image into the scratch directory.
///
/// Images whose orientation tag is missing or unreadable are copied
/// byte-for-byte. A file that cannot be decoded at all is a fatal error:
/// the encoder would reject it anyway.
///
/// # Returns
///
/// * `Ok(Vec<NormalizedFrame>)` - One frame per input, in input order
pub fn normalize_images(
    images: &[SourceImage],
    scratch_dir: &Path,
) -> CoreResult<Vec<NormalizedFrame>> {
    let mut frames = Vec::with_capacity(images.len());

    for source in images {
        let dst = scratch_dir.join(scratch_file_name(source.sequence_index, &source.path));
        let code = read_orientation_code(&source.path).unwrap_or(1);
        let correction = correction_for_code(code);

        let (width, height) = if correction == Correction::None {
            std::fs::copy(&source.path, &dst)?;
            image::image_dimensions(&dst).map_err(|source_err| CoreError::Image {
                path: dst.display().to_string(),
                source: source_err,
            })?
        } else {
            debug!(
                "Correcting orientation {code} for {}: {correction:?}",
                source.path.display()
            );
            let img = image::open(&source.path).map_err(|source_err| CoreError::Image {
                path: source.path.display().to_string(),
                source: source_err,
            })?;
            let img = apply_correction(img, correction);
            img.save(&dst).map_err(|source_err| CoreError::Image {
                path: dst.display().to_string(),
                source: source_err,
            })?;
            (img.width(), img.height())
        };

        frames.push(NormalizedFrame {
            scratch_path: dst,
            width,
            height,
        });
    }

    Ok(frames)
}
