use anyhow::{Context, Result};
use image::ImageReader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// What the extractor found in a file.
pub enum MetadataOutcome {
    /// The image decoded and carried an EXIF block (possibly partially recovered)
    Valid(exif::Exif),
    /// The image decoded but has no EXIF block
    NoMetadata,
    /// The file could not be opened, decoded or its EXIF block could not be parsed
    Unreadable(String),
}

impl MetadataOutcome {
    pub fn exif(&self) -> Option<&exif::Exif> {
        match self {
            MetadataOutcome::Valid(exif) => Some(exif),
            _ => None,
        }
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self, MetadataOutcome::Unreadable(_))
    }
}

/// Opens `path` as an image, checks that it decodes, and reads its EXIF block.
///
/// Never fails: every problem is logged and folded into the outcome.
pub fn get_exif(path: &Path) -> MetadataOutcome {
    debug!("trying to open file: {}", path.display());

    if let Err(e) = verify_image(path) {
        warn!("opening {} failed: {:#}", path.display(), e);
        return MetadataOutcome::Unreadable(format!("{:#}", e));
    }

    match read_exif(path) {
        Ok(exif) => MetadataOutcome::Valid(exif),
        Err(exif::Error::NotFound(_)) => {
            debug!("no EXIF block in {}", path.display());
            MetadataOutcome::NoMetadata
        }
        Err(e) => {
            warn!("reading EXIF from {} failed: {}", path.display(), e);
            MetadataOutcome::Unreadable(e.to_string())
        }
    }
}

/// Reads the EXIF block of `path`, keeping whatever a damaged block still yields.
pub fn read_exif(path: &Path) -> std::result::Result<exif::Exif, exif::Error> {
    let file = File::open(path)?;
    let mut exif_reader = exif::Reader::new();
    exif_reader.continue_on_error(true); // Tolerate non-standard EXIF structures

    match exif_reader.read_from_container(&mut BufReader::new(file)) {
        Err(exif::Error::PartialResult(partial)) => {
            let (exif, errors) = partial.into_inner();
            debug!(
                "recovered EXIF from {} with {} error(s)",
                path.display(),
                errors.len()
            );
            Ok(exif)
        }
        other => other,
    }
}

fn verify_image(path: &Path) -> Result<()> {
    ImageReader::open(path)
        .with_context(|| format!("Failed to open image: {:?}", path))?
        .with_guessed_format()
        .with_context(|| format!("Failed to detect image format: {:?}", path))?
        .decode()
        .with_context(|| format!("Failed to decode image: {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use tempfile::tempdir;

    #[test]
    fn plain_jpeg_has_no_metadata() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write_plain_jpeg(dir.path(), "plain.jpg", 32, 16);

        assert!(matches!(get_exif(&path), MetadataOutcome::NoMetadata));
    }

    #[test]
    fn corrupt_file_is_unreadable() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write_corrupt_file(dir.path(), "broken.jpg");

        let outcome = get_exif(&path);
        assert!(outcome.is_unreadable());
        assert!(outcome.exif().is_none());
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempdir().expect("failed to create temp dir");
        assert!(get_exif(&dir.path().join("nope.jpg")).is_unreadable());
    }

    #[test]
    fn geotagged_jpeg_yields_exif_block() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write_jpeg_with_exif(
            dir.path(),
            "tagged.jpg",
            &gps_tiff(b'N', [40, 30, 0], b'W', [74, 0, 0]),
        );

        let outcome = get_exif(&path);
        let exif = outcome.exif().expect("expected an EXIF block");
        assert!(exif
            .get_field(exif::Tag::GPSLatitude, exif::In::PRIMARY)
            .is_some());
    }

    #[test]
    fn read_exif_reports_missing_block() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write_plain_jpeg(dir.path(), "plain.jpg", 8, 8);

        assert!(matches!(read_exif(&path), Err(exif::Error::NotFound(_))));
    }

    #[test]
    fn read_exif_sees_orientation_tag() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write_jpeg_with_exif(dir.path(), "rotated.jpg", &orientation_tiff(6));

        let exif = read_exif(&path).expect("expected an EXIF block");
        let orientation = exif
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|f| f.value.get_uint(0));
        assert_eq!(orientation, Some(6));
    }
}
