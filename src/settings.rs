use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::constants::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub input_dir: PathBuf,
    #[serde(default)]
    pub recursive: bool,
    pub include_ratio: usize,
    #[serde(default)]
    pub with_images: bool,
    pub output_dir: PathBuf,
    pub scratch_dir: PathBuf,
    /// Output file stem; derived from `input_dir` when unset
    pub map_name: Option<String>,
    #[serde(default)]
    pub apply_hemisphere_sign: bool,
    pub thumbnail_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            recursive: false,
            include_ratio: 1,
            with_images: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            scratch_dir: PathBuf::from(DEFAULT_SCRATCH_DIR),
            map_name: None,
            apply_hemisphere_sign: false,
            thumbnail_height: THUMBNAIL_HEIGHT,
        }
    }
}

impl Settings {
    /// Overlays values from the config file next to the executable, if present.
    pub fn load(self) -> Result<Self> {
        self.load_from(&Self::config_path())
    }

    pub fn load_from(mut self, config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(self);
        }

        let file = File::open(config_path).context("Failed to open config file")?;
        let reader = BufReader::new(file);
        let mut config_map = HashMap::new();

        for line in reader.lines() {
            let line = line.context("Failed to read line from config")?;
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(key.trim().to_string(), value.trim().trim_matches('"').to_string());
            }
        }

        if let Some(input_dir) = config_map.get("input_dir") {
            self.input_dir = PathBuf::from(input_dir);
        }
        if let Some(output_dir) = config_map.get("output_dir") {
            self.output_dir = PathBuf::from(output_dir);
        }
        if let Some(scratch_dir) = config_map.get("scratch_dir") {
            self.scratch_dir = PathBuf::from(scratch_dir);
        }
        if let Some(map_name) = config_map.get("map_name") {
            if !map_name.is_empty() {
                self.map_name = Some(map_name.clone());
            }
        }
        if let Some(ratio_str) = config_map.get("include_ratio") {
            if let Ok(ratio) = ratio_str.parse::<usize>() {
                self.include_ratio = ratio;
            }
        }
        if let Some(height_str) = config_map.get("thumbnail_height") {
            if let Ok(height) = height_str.parse::<u32>() {
                self.thumbnail_height = height;
            }
        }
        if let Some(recursive_str) = config_map.get("recursive") {
            if let Ok(recursive) = recursive_str.parse::<bool>() {
                self.recursive = recursive;
            }
        }
        if let Some(with_images_str) = config_map.get("with_images") {
            if let Ok(with_images) = with_images_str.parse::<bool>() {
                self.with_images = with_images;
            }
        }
        if let Some(sign_str) = config_map.get("apply_hemisphere_sign") {
            if let Ok(apply) = sign_str.parse::<bool>() {
                self.apply_hemisphere_sign = apply;
            }
        }

        Ok(self)
    }

    /// Rejects values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.include_ratio == 0 {
            bail!("include_ratio must be at least 1");
        }
        if self.thumbnail_height == 0 {
            bail!("thumbnail_height must be at least 1");
        }
        Ok(())
    }

    pub fn map_name(&self) -> String {
        match &self.map_name {
            Some(name) => name.clone(),
            None => crate::utils::map_name_for_directory(&self.input_dir, DEFAULT_MAP_NAME),
        }
    }

    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push(CONFIG_FILE_NAME);
        path
    }
}
