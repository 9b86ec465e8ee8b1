//! Directory configuration: where the data lives and how it is cached.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_VALIDATION_FILE: &str = "pincodes.compressed.json";
pub const DEFAULT_DISTRICTS_FILE: &str = "districts.json";
pub const DEFAULT_GEO_FILE: &str = "geo.json";
pub const DEFAULT_DETAILS_DIR: &str = "details";
pub const DEFAULT_SHARD_CACHE_CAPACITY: usize = 32;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Root directory holding the data files
    pub data_dir: PathBuf,
    /// Prefix -> suffix list used for validation
    pub validation_file: String,
    pub districts_file: String,
    pub geo_file: String,
    /// Sub-directory of per-prefix detail shards
    pub details_dir: String,
    /// Parsed shards kept in memory (0 re-reads the shard on every lookup)
    pub shard_cache_capacity: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            validation_file: DEFAULT_VALIDATION_FILE.to_string(),
            districts_file: DEFAULT_DISTRICTS_FILE.to_string(),
            geo_file: DEFAULT_GEO_FILE.to_string(),
            details_dir: DEFAULT_DETAILS_DIR.to_string(),
            shard_cache_capacity: DEFAULT_SHARD_CACHE_CAPACITY,
        }
    }
}

impl DirectoryConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: DirectoryConfig =
            toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Default file layout rooted at `data_dir`
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn with_shard_cache_capacity(mut self, capacity: usize) -> Self {
        self.shard_cache_capacity = capacity;
        self
    }
}
