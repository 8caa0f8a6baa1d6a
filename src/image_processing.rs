use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::exif_parser::{apply_orientation, exif_orientation, read_exif};

/// A resized copy of a photo living in the scratch directory.
///
/// The file is removed when this value is dropped.
pub struct Thumbnail {
    file: NamedTempFile,
    pub width: u32,
    pub height: u32,
}

impl Thumbnail {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Reads the encoded thumbnail back from disk.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        std::fs::read(self.path())
            .with_context(|| format!("Failed to read thumbnail: {:?}", self.path()))
    }

    /// Deletes the scratch file, reporting failures instead of ignoring them.
    pub fn remove(self) -> Result<()> {
        self.file
            .close()
            .with_context(|| "Failed to delete thumbnail scratch file")
    }

    pub fn mime_type(&self) -> &'static str {
        "image/jpeg"
    }
}

/// Width matching `target_height` at the source aspect ratio, truncated.
pub fn proportional_width(width: u32, height: u32, target_height: u32) -> u32 {
    let height_percent = target_height as f64 / height as f64;
    ((width as f64 * height_percent) as u32).max(1)
}

/// Scales `img` to a fixed height with nearest-neighbor sampling.
fn create_scaled_image(img: &DynamicImage, target_height: u32) -> DynamicImage {
    let width = proportional_width(img.width(), img.height(), target_height);
    img.resize_exact(width, target_height, FilterType::Nearest)
}

/// Writes a fixed-height copy of `source_path` into `scratch_dir`.
pub fn resize_image(source_path: &Path, scratch_dir: &Path, target_height: u32) -> Result<Thumbnail> {
    let img = image::open(source_path)
        .with_context(|| format!("Failed to open image: {:?}", source_path))?;
    let orientation = read_exif(source_path).map_or(1, |exif| exif_orientation(&exif));
    let img = apply_orientation(img, orientation);

    let scaled = create_scaled_image(&img, target_height);
    let (width, height) = (scaled.width(), scaled.height());

    let file = tempfile::Builder::new()
        .prefix("thumb-")
        .suffix(".jpg")
        .tempfile_in(scratch_dir)
        .with_context(|| format!("Failed to create scratch file in {:?}", scratch_dir))?;

    // JPEG has no alpha channel
    DynamicImage::ImageRgb8(scaled.to_rgb8())
        .save_with_format(file.path(), ImageFormat::Jpeg)
        .with_context(|| format!("Failed to write thumbnail for {:?}", source_path))?;

    Ok(Thumbnail { file, width, height })
}
