use exif::{Context, In, Value};
use std::collections::BTreeMap;

use super::generic::{value_to_dms, value_to_ref_char};
use super::metadata::MetadataOutcome;

pub const GPS_LATITUDE: &str = "GPSLatitude";
pub const GPS_LATITUDE_REF: &str = "GPSLatitudeRef";
pub const GPS_LONGITUDE: &str = "GPSLongitude";
pub const GPS_LONGITUDE_REF: &str = "GPSLongitudeRef";

/// GPS sub-fields of an EXIF block, keyed by tag name (`GPSLatitude`, ...).
#[derive(Debug, Clone, Default)]
pub struct GeoTags {
    fields: BTreeMap<String, Value>,
}

impl GeoTags {
    /// Collects every primary-image field that lives in the GPS IFD.
    pub fn from_exif(exif: &exif::Exif) -> Self {
        let mut tags = GeoTags::default();
        for field in exif.fields() {
            if field.ifd_num == In::PRIMARY && field.tag.context() == Context::Gps {
                tags.insert(field.tag.to_string(), field.value.clone());
            }
        }
        tags
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn latitude_dms(&self) -> Option<[f64; 3]> {
        self.get(GPS_LATITUDE).and_then(value_to_dms)
    }

    pub fn longitude_dms(&self) -> Option<[f64; 3]> {
        self.get(GPS_LONGITUDE).and_then(value_to_dms)
    }

    pub fn latitude_ref(&self) -> Option<char> {
        self.get(GPS_LATITUDE_REF).and_then(value_to_ref_char)
    }

    pub fn longitude_ref(&self) -> Option<char> {
        self.get(GPS_LONGITUDE_REF).and_then(value_to_ref_char)
    }
}

/// Locates the GPS sub-fields of an extraction outcome.
///
/// Anything other than a valid EXIF block, or a block without a GPS IFD,
/// yields an empty mapping.
pub fn get_geotagging(outcome: &MetadataOutcome) -> GeoTags {
    match outcome.exif() {
        Some(exif) => GeoTags::from_exif(exif),
        None => GeoTags::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{gps_tiff, tiff_without_gps};

    fn read_tiff(data: Vec<u8>) -> exif::Exif {
        exif::Reader::new().read_raw(data).expect("fixture should parse")
    }

    #[test]
    fn gps_fields_are_collected_by_name() {
        let exif = read_tiff(gps_tiff(b'N', [40, 30, 0], b'W', [74, 0, 0]));
        let tags = GeoTags::from_exif(&exif);

        let names: Vec<&str> = tags.names().collect();
        assert_eq!(
            names,
            vec![GPS_LATITUDE, GPS_LATITUDE_REF, GPS_LONGITUDE, GPS_LONGITUDE_REF]
        );
        assert_eq!(tags.latitude_dms(), Some([40.0, 30.0, 0.0]));
        assert_eq!(tags.longitude_dms(), Some([74.0, 0.0, 0.0]));
        assert_eq!(tags.latitude_ref(), Some('N'));
        assert_eq!(tags.longitude_ref(), Some('W'));
    }

    #[test]
    fn exif_without_gps_block_gives_empty_mapping() {
        let exif = read_tiff(tiff_without_gps());
        let tags = GeoTags::from_exif(&exif);

        assert_eq!(tags.names().count(), 0);
        assert!(tags.latitude_dms().is_none());
    }

    #[test]
    fn non_valid_outcomes_give_empty_mapping() {
        assert_eq!(get_geotagging(&MetadataOutcome::NoMetadata).names().count(), 0);
        assert_eq!(
            get_geotagging(&MetadataOutcome::Unreadable("bad".into())).names().count(),
            0
        );
    }

    #[test]
    fn valid_outcome_is_searched() {
        let exif = read_tiff(gps_tiff(b'S', [10, 0, 0], b'E', [20, 0, 0]));
        let tags = get_geotagging(&MetadataOutcome::Valid(exif));
        assert_eq!(tags.names().count(), 4);
    }
}
