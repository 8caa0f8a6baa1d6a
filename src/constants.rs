// File discovery
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

// Default locations, relative to the working directory
pub const DEFAULT_INPUT_DIR: &str = "photos";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_SCRATCH_DIR: &str = "temp";
pub const DEFAULT_MAP_NAME: &str = "map";
pub const CONFIG_FILE_NAME: &str = "geotag_map.ini";

// Thumbnails are scaled to a fixed height, width follows the aspect ratio
pub const THUMBNAIL_HEIGHT: u32 = 400;
// Extra room around the thumbnail inside the popup frame
pub const POPUP_PADDING: u32 = 30;

// Initial map view
pub const MAP_CENTER: [f64; 2] = [0.0, 0.0];
pub const MAP_ZOOM: u8 = 4;
