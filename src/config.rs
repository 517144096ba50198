//! Engine configuration

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Tunable limits of the library engine
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of search results returned
    pub search_limit: usize,

    /// Minimum character count for a word to become a search keyword
    pub min_keyword_len: usize,

    /// Number of songs kept in the recently-played history
    pub recent_capacity: usize,

    /// Overlap percentage at which two playlists are suggested for merging
    pub merge_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_limit: 15,
            min_keyword_len: 3,
            recent_capacity: 10,
            merge_threshold: 80.0,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn with_min_keyword_len(mut self, len: usize) -> Self {
        self.min_keyword_len = len;
        self
    }

    pub fn with_recent_capacity(mut self, capacity: usize) -> Self {
        self.recent_capacity = capacity;
        self
    }

    pub fn with_merge_threshold(mut self, threshold: f64) -> Self {
        self.merge_threshold = threshold;
        self
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid engine config")
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        log::info!("Loaded engine config from {:?}", path);
        Ok(config)
    }
}
