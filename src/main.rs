use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod constants;
mod exif_parser;
mod geo;
mod html_template;
mod image_processing;
mod map;
mod processing;
mod scanner;
mod settings;
#[cfg(test)]
mod test_utils;
mod utils;

use map::create_map_from_multiple;
use processing::create_images_gps_refs;
use scanner::{list_photos, list_photos_recursively};
use settings::Settings;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🗺️  Geotag Map starting...");

    let settings = Settings {
        input_dir: PathBuf::from("photos"),
        recursive: false,
        include_ratio: 1,
        with_images: false,
        ..Default::default()
    }
    .load()
    .context("Failed to load settings")?;
    settings.validate()?;

    println!("🔍 Scanning photos directory: {}", settings.input_dir.display());
    let photos = if settings.recursive {
        list_photos_recursively(&settings.input_dir)?
    } else {
        list_photos(&settings.input_dir)?
    };
    println!("✅ Found {} photos. Reading GPS data...", photos.len());

    let (refs, summary) = create_images_gps_refs(&photos, settings.apply_hemisphere_sign);

    let name = settings.map_name();
    let (output_path, stats) = create_map_from_multiple(&refs, &name, &settings)?;

    println!("\n📊 Processing statistics:");
    println!("   🔍 Files checked: {}", summary.total_files);
    println!("   🗺️  With GPS data: {}", summary.with_gps);
    println!("   ❌ Without GPS: {}", summary.without_gps);
    println!("   ⚠️  Unreadable: {}", summary.unreadable);
    println!("   📍 Markers placed: {} of {} visited", stats.placed, stats.visited);
    if settings.with_images {
        println!("   🖼️  Thumbnails embedded: {}", stats.thumbnails);
        if stats.thumbnail_failures > 0 {
            println!("   ⚠️  Thumbnail failures: {}", stats.thumbnail_failures);
        }
    }
    println!("   ⏱️  Scan time: {:.2} sec", summary.elapsed.as_secs_f64());

    println!("\n🎉 Done! Map saved to {}", output_path.display());

    Ok(())
}
