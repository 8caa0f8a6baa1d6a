use exif::{Exif, In, Tag, Value};
use image::DynamicImage;

/// Orientation tag of the primary image, 1 (upright) when absent.
pub fn exif_orientation(exif: &Exif) -> u32 {
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        .unwrap_or(1)
}

/// Turns a decoded image upright according to an EXIF orientation value.
///
/// Values 2..=8 are a rotation followed by an optional horizontal mirror;
/// anything else leaves the image untouched.
pub fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    let rotated = match orientation {
        3 | 4 => img.rotate180(),
        5 | 6 => img.rotate90(),
        7 | 8 => img.rotate270(),
        _ => img,
    };
    match orientation {
        2 | 4 | 5 | 7 => rotated.fliph(),
        _ => rotated,
    }
}

/// Reads the first three components of a numeric EXIF value as degrees,
/// minutes and seconds.
///
/// GPS coordinates are stored as unsigned rationals by the standard, but
/// writers in the wild also use signed rationals, integers and floats.
pub fn value_to_dms(value: &Value) -> Option<[f64; 3]> {
    let components: Vec<f64> = match value {
        Value::Rational(v) => v.iter().map(|r| r.to_f64()).collect(),
        Value::SRational(v) => v.iter().map(|r| r.to_f64()).collect(),
        Value::Short(v) => v.iter().map(|&n| n as f64).collect(),
        Value::Long(v) => v.iter().map(|&n| n as f64).collect(),
        Value::SShort(v) => v.iter().map(|&n| n as f64).collect(),
        Value::SLong(v) => v.iter().map(|&n| n as f64).collect(),
        Value::Float(v) => v.iter().map(|&n| n as f64).collect(),
        Value::Double(v) => v.clone(),
        _ => return None,
    };

    match components.as_slice() {
        [d, m, s, ..] => Some([*d, *m, *s]),
        _ => None,
    }
}

/// First character of an ASCII EXIF value, e.g. the `N` of a latitude reference
pub fn value_to_ref_char(value: &Value) -> Option<char> {
    if let Value::Ascii(ref vec) = value {
        vec.first()
            .and_then(|bytes| bytes.first())
            .map(|&b| b as char)
    } else {
        None
    }
}
