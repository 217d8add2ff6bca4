use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::digest::DEFAULT_CHUNK_SIZE;

/// Global configuration loaded from `~/.config/hashsig/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashsigConfig {
    /// Bytes read per chunk while hashing (default 256 KiB).
    pub chunk_size: usize,
    /// Print a progress line on stderr while hashing.
    pub show_progress: bool,
    /// Minimum delay between progress lines in milliseconds.
    pub progress_interval_ms: u64,
}

impl Default for HashsigConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            show_progress: true,
            progress_interval_ms: 200,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hashsig")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit path.
pub fn load_from_path(path: &Path) -> Result<HashsigConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: HashsigConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HashsigConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HashsigConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}
