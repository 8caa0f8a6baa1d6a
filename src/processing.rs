use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::exif_parser::{get_exif, get_geotagging, GeoTags};
use crate::geo::{dms_to_dd, ImageGeoReference, Position};

/// Counters collected while building references.
///
/// Each file lands in exactly one of `with_gps`, `without_gps` and `unreadable`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScanSummary {
    pub total_files: usize,
    pub with_gps: usize,
    pub without_gps: usize,
    pub unreadable: usize,
    pub elapsed: Duration,
}

/// Builds the reference for one file and records the outcome in `summary`.
///
/// Unreadable files and files without latitude or longitude become invalid
/// references.
pub fn create_image_gps_ref(path: &Path, apply_hemisphere_sign: bool, summary: &mut ScanSummary) -> ImageGeoReference {
    let outcome = get_exif(path);
    let reference = reference_from_geotags(path, &get_geotagging(&outcome), apply_hemisphere_sign);

    if outcome.is_unreadable() {
        summary.unreadable += 1;
    } else if reference.is_invalid() {
        summary.without_gps += 1;
    } else {
        summary.with_gps += 1;
    }
    reference
}

/// Turns located GPS fields into a reference.
///
/// Reference letters (N/S, E/W) only affect the result when
/// `apply_hemisphere_sign` is set; otherwise the stored degrees are used as-is.
pub fn reference_from_geotags(path: &Path, geotags: &GeoTags, apply_hemisphere_sign: bool) -> ImageGeoReference {
    let (Some(lat), Some(lon)) = (geotags.latitude_dms(), geotags.longitude_dms()) else {
        debug!(
            "no usable GPS data in {} (GPS fields: {:?})",
            path.display(),
            geotags.names().collect::<Vec<_>>()
        );
        return ImageGeoReference::invalid(path);
    };

    let mut lat = dms_to_dd(lat[0], lat[1], lat[2]);
    let mut lon = dms_to_dd(lon[0], lon[1], lon[2]);

    if apply_hemisphere_sign {
        if geotags.latitude_ref() == Some('S') {
            lat = -lat.abs();
        }
        if geotags.longitude_ref() == Some('W') {
            lon = -lon.abs();
        }
    }

    ImageGeoReference::valid(path, Position::new(lat, lon))
}

/// Builds one reference per path, preserving input order.
pub fn create_images_gps_refs(photos: &[PathBuf], apply_hemisphere_sign: bool) -> (Vec<ImageGeoReference>, ScanSummary) {
    let start_time = Instant::now();
    let mut summary = ScanSummary {
        total_files: photos.len(),
        ..Default::default()
    };

    let refs: Vec<ImageGeoReference> = photos
        .iter()
        .map(|path| create_image_gps_ref(path, apply_hemisphere_sign, &mut summary))
        .collect();

    summary.elapsed = start_time.elapsed();
    info!(
        "scanned {} files: {} with GPS, {} without, {} unreadable",
        summary.total_files, summary.with_gps, summary.without_gps, summary.unreadable
    );
    (refs, summary)
}
