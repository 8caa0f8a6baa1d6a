use std::path::Path;

/// Ensures the directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<(), std::io::Error> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Returns the file name component for display, falling back to the full path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Derives the map name from the last component of the input directory
pub fn map_name_for_directory(dir: &Path, fallback: &str) -> String {
    dir.components()
        .next_back()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .filter(|name| !name.is_empty() && name != "." && name != "/")
        .unwrap_or_else(|| fallback.to_string())
}

/// Escapes text for use inside HTML markup or attribute values
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
