//! Configuration for the medevidence client.
//!
//! Loaded from a TOML file; every field has a default so an empty or
//! partial file is valid.
//!
//! ```toml
//! [backend]
//! base_url = "http://localhost:3001"
//! timeout_seconds = 8
//!
//! [search]
//! sources = ["pubmed", "europepmc"]
//! max_results = 20
//! cache_ttl_seconds = 600
//! date_range = "5years"
//! study_type = "all"
//! ```

use std::path::PathBuf;

use evidence_search::{DateRange, SearchConfig, SearchFilters, Source, StudyTypeFilter};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Top-level client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub search: SearchSettings,
}

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend, without a trailing endpoint path.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        let search = SearchConfig::default();
        Self {
            base_url: search.base_url,
            timeout_seconds: search.timeout_seconds,
        }
    }
}

/// Search defaults applied to every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub sources: Vec<Source>,
    pub max_results: usize,
    /// 0 disables the result cache.
    pub cache_ttl_seconds: u64,
    pub date_range: DateRange,
    pub study_type: StudyTypeFilter,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let search = SearchConfig::default();
        Self {
            sources: search.sources,
            max_results: search.max_results,
            cache_ttl_seconds: search.cache_ttl_seconds,
            date_range: DateRange::default(),
            study_type: StudyTypeFilter::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/medevidence/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("medevidence").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("medevidence")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/medevidence-config/config.toml")
        }
    }

    /// Settings for the aggregation library.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            base_url: self.backend.base_url.clone(),
            sources: self.search.sources.clone(),
            max_results: self.search.max_results,
            timeout_seconds: self.backend.timeout_seconds,
            cache_ttl_seconds: self.search.cache_ttl_seconds,
        }
    }

    /// Default filters for a search.
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            date_range: self.search.date_range,
            study_type: self.search.study_type,
        }
    }
}
