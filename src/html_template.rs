use anyhow::{anyhow, Context, Result};
use rust_embed::RustEmbed;

use crate::map::MapContext;
use crate::utils::escape_html;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

const MAP_TEMPLATE: &str = "map.html";

/// Fills the embedded Leaflet page with the markers collected in `ctx`.
pub fn render_document(ctx: &MapContext, title: &str) -> Result<String> {
    let template = Asset::get(MAP_TEMPLATE)
        .ok_or_else(|| anyhow!("Missing embedded template: {}", MAP_TEMPLATE))?;
    let template = std::str::from_utf8(template.data.as_ref())
        .context("Map template is not valid UTF-8")?;

    // A literal "</script>" inside the JSON would end the script block early
    let markers = serde_json::to_string(ctx.markers())?.replace("</", "<\\/");
    let center = serde_json::to_string(&ctx.center)?;

    Ok(template
        .replace("{{TITLE}}", &escape_html(title))
        .replace("{{CENTER}}", &center)
        .replace("{{ZOOM}}", &ctx.zoom.to_string())
        .replace("{{MARKERS}}", &markers))
}
