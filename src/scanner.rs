use anyhow::{bail, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::constants::IMAGE_EXTENSIONS;

/// Image files directly inside `directory`.
pub fn list_photos(directory: &Path) -> Result<Vec<PathBuf>> {
    collect_photos(directory, Some(1))
}

/// Image files anywhere below `root`.
pub fn list_photos_recursively(root: &Path) -> Result<Vec<PathBuf>> {
    collect_photos(root, None)
}

fn collect_photos(directory: &Path, max_depth: Option<usize>) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        bail!("Photos directory not found: {}", directory.display());
    }

    let mut files: Vec<PathBuf> = WalkBuilder::new(directory)
        .max_depth(max_depth)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|e| e.file_type().map_or(false, |ft| ft.is_file()))
        .map(|e| e.into_path())
        .filter(|path| is_supported_image(path))
        .collect();

    files.sort();
    Ok(files)
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.to_lowercase())
        .map_or(false, |ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
