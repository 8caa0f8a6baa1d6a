use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::constants::*;
use crate::geo::{ImageGeoReference, Position};
use crate::html_template::render_document;
use crate::image_processing::resize_image;
use crate::settings::Settings;
use crate::utils::{display_name, ensure_directory_exists, escape_html};

/// Inline popup content and the frame size it was laid out for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub html: String,
    pub width: u32,
    pub height: u32,
    pub max_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<Popup>,
}

impl Marker {
    pub fn plain(position: Position) -> Self {
        Self {
            lat: position.lat,
            lon: position.lon,
            tooltip: None,
            popup: None,
        }
    }

    /// The tooltip is shown as HTML by the page, so it is escaped here.
    pub fn with_popup(position: Position, tooltip: &str, popup: Popup) -> Self {
        Self {
            lat: position.lat,
            lon: position.lon,
            tooltip: Some(escape_html(tooltip)),
            popup: Some(popup),
        }
    }
}

/// Map state accumulated while rendering.
#[derive(Debug, Clone)]
pub struct MapContext {
    pub center: [f64; 2],
    pub zoom: u8,
    markers: Vec<Marker>,
}

impl MapContext {
    pub fn new() -> Self {
        Self {
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            markers: Vec::new(),
        }
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl Default for MapContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Every n-th reference (by index) is considered
    pub include_ratio: usize,
    pub with_images: bool,
    pub scratch_dir: PathBuf,
    pub thumbnail_height: u32,
}

impl From<&Settings> for RenderOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            include_ratio: settings.include_ratio,
            with_images: settings.with_images,
            scratch_dir: settings.scratch_dir.clone(),
            thumbnail_height: settings.thumbnail_height,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderStats {
    /// Indices 0, k, 2k, ... that were looked at
    pub visited: usize,
    pub placed: usize,
    pub skipped_invalid: usize,
    pub thumbnails: usize,
    pub thumbnail_failures: usize,
}

/// Places a marker for every included valid reference.
pub fn place_markers(
    ctx: &mut MapContext,
    refs: &[ImageGeoReference],
    options: &RenderOptions,
) -> Result<RenderStats> {
    if options.include_ratio == 0 {
        bail!("include_ratio must be at least 1");
    }
    if options.with_images {
        ensure_directory_exists(&options.scratch_dir).with_context(|| {
            format!("Failed to create scratch directory: {:?}", options.scratch_dir)
        })?;
    }

    let mut stats = RenderStats::default();
    let total = refs.len();

    for (index, source) in refs.iter().enumerate().step_by(options.include_ratio) {
        debug!("{} out of {} done", index, total);
        stats.visited += 1;

        if source.is_invalid() {
            stats.skipped_invalid += 1;
            continue;
        }

        if place_single_poi(ctx, source, options) {
            stats.thumbnails += 1;
        } else if options.with_images {
            stats.thumbnail_failures += 1;
        }
        stats.placed += 1;
        debug!("{} added to map", source.path().display());
    }

    Ok(stats)
}

/// Adds one marker for a valid reference. Returns whether a thumbnail popup
/// was attached.
fn place_single_poi(ctx: &mut MapContext, source: &ImageGeoReference, options: &RenderOptions) -> bool {
    let Some(position) = source.position() else {
        return false;
    };
    debug!("placing {} at {}", display_name(source.path()), position);

    if !options.with_images {
        ctx.add_marker(Marker::plain(position));
        return false;
    }

    match build_popup(source.path(), options) {
        Ok(popup) => {
            ctx.add_marker(Marker::with_popup(position, &display_name(source.path()), popup));
            true
        }
        Err(e) => {
            warn!("thumbnail for {} failed: {:#}", source.path().display(), e);
            ctx.add_marker(Marker::plain(position));
            false
        }
    }
}

/// Resizes the photo into the scratch directory, inlines it, and deletes the
/// scratch file before returning.
fn build_popup(path: &Path, options: &RenderOptions) -> Result<Popup> {
    let thumbnail = resize_image(path, &options.scratch_dir, options.thumbnail_height)?;
    let encoded = STANDARD.encode(thumbnail.read_bytes()?);
    let image_html = format!(
        r#"<img src="data:{};base64,{}">"#,
        thumbnail.mime_type(),
        encoded
    );
    let (width, height) = (
        thumbnail.width + POPUP_PADDING,
        thumbnail.height + POPUP_PADDING,
    );
    thumbnail.remove()?;

    let html = format!(
        r#"<iframe src="data:text/html;charset=utf-8;base64,{}" width="{}" height="{}"></iframe>"#,
        STANDARD.encode(image_html),
        width,
        height
    );

    Ok(Popup {
        html,
        width,
        height,
        max_width: width,
    })
}

/// Writes the rendered document to `<output_dir>/<name>.html`.
pub fn write_map(ctx: &MapContext, output_dir: &Path, name: &str) -> Result<PathBuf> {
    ensure_directory_exists(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let output_path = output_dir.join(format!("{}.html", name));
    let document = render_document(ctx, name)?;
    std::fs::write(&output_path, document)
        .with_context(|| format!("Failed to write map: {:?}", output_path))?;

    info!("map written to {}", output_path.display());
    Ok(output_path)
}

/// Renders `refs` into a fresh map and writes it to the configured output directory.
pub fn create_map_from_multiple(
    refs: &[ImageGeoReference],
    name: &str,
    settings: &Settings,
) -> Result<(PathBuf, RenderStats)> {
    let mut ctx = MapContext::new();
    let stats = place_markers(&mut ctx, refs, &RenderOptions::from(settings))?;
    let output_path = write_map(&ctx, &settings.output_dir, name)?;
    Ok((output_path, stats))
}
