//! Settings structures for papersearch configuration

use crate::results::SortMode;
use crate::search::{IndexingField, SearchToggles};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main settings structure matching `settings.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub api: ApiSettings,
    pub search: SearchSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (PAPERSEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("PAPERSEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("PAPERSEARCH_API_URL") {
            self.api.base_url = val;
        }
        if let Ok(val) = std::env::var("PAPERSEARCH_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.api.request_timeout = timeout;
            }
        }
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
}

/// Remote search API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// User agent sent with every request (none = crate default)
    pub user_agent: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:12312/api".to_string(),
            request_timeout: 30.0,
            user_agent: None,
        }
    }
}

impl ApiSettings {
    /// Effective request timeout. Non-positive or non-finite values fall back to the default.
    pub fn timeout(&self) -> Duration {
        if self.request_timeout.is_finite() && self.request_timeout > 0.0 {
            Duration::from_secs_f64(self.request_timeout)
        } else {
            Duration::from_secs_f64(ApiSettings::default().request_timeout)
        }
    }
}

/// Initial search state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Use the deep search endpoint
    pub deep: bool,
    /// Ask the backend to rewrite/decompose the query
    pub query_understanding: bool,
    /// Ask the backend to rerank candidates
    pub smart_rerank: bool,
    /// Allow the backend to answer from its cache
    pub use_cache: bool,
    /// Ask the backend to attach social impact scores
    pub social_impact: bool,
    /// Indexing fields selected at startup
    pub indexing_fields: Vec<String>,
    /// Initial sort order
    pub sort: SortMode,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            deep: true,
            query_understanding: false,
            smart_rerank: true,
            use_cache: true,
            social_impact: false,
            indexing_fields: IndexingField::ALL
                .iter()
                .map(|f| f.as_str().to_string())
                .collect(),
            sort: SortMode::Relevance,
        }
    }
}

impl SearchSettings {
    /// Feature toggles described by these settings
    pub fn toggles(&self) -> SearchToggles {
        SearchToggles {
            deep: self.deep,
            query_understanding: self.query_understanding,
            smart_rerank: self.smart_rerank,
            use_cache: self.use_cache,
            social_impact: self.social_impact,
        }
    }
}
