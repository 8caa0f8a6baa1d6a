pub mod generic;
pub mod geotags;
pub mod metadata;

pub use generic::{apply_orientation, exif_orientation};
pub use geotags::{get_geotagging, GeoTags};
pub use metadata::{get_exif, read_exif};
