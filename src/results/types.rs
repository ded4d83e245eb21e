//! Payload types returned by the remote search API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fallback recommended queries used when the config endpoint is unreachable
pub const FALLBACK_QUERIES: [&str; 3] = ["Deep Learning", "Quantum Computing", "Federated Learning"];

/// A single search result.
///
/// The record is passed through untouched; only `social_score` is
/// interpreted structurally. The string accessors exist for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultItem(Map<String, Value>);

impl ResultItem {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Social impact score, if present and numeric
    pub fn social_score(&self) -> Option<f64> {
        self.0.get("social_score").and_then(Value::as_f64)
    }

    /// Score used for ordering; absent or null counts as zero
    pub fn sort_score(&self) -> f64 {
        self.social_score().unwrap_or(0.0)
    }

    /// Raw field access
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Non-empty string field
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.text("title")
    }

    pub fn authors(&self) -> Option<&str> {
        self.text("authors")
    }

    pub fn url(&self) -> Option<&str> {
        self.text("url")
    }

    /// Abstract or TL;DR text
    pub fn summary(&self) -> Option<&str> {
        self.text("abs")
    }

    pub fn meta(&self) -> Option<&str> {
        self.text("meta")
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Body of a search response.
///
/// Simple and uncached deep searches return a bare list. Deep searches may
/// instead wrap the list together with a cache status message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchPayload {
    Results(Vec<ResultItem>),
    Cached {
        cache_info: String,
        #[serde(default)]
        results: Option<Vec<ResultItem>>,
    },
}

impl SearchPayload {
    /// Split into the result list and the optional cache message
    pub fn into_parts(self) -> (Vec<ResultItem>, Option<String>) {
        match self {
            Self::Results(results) => (results, None),
            Self::Cached {
                cache_info,
                results,
            } => (results.unwrap_or_default(), Some(cache_info)),
        }
    }
}

/// Body of the config endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub recommended_queries: Vec<String>,
}

impl RemoteConfig {
    pub fn fallback() -> Self {
        Self {
            recommended_queries: FALLBACK_QUERIES.iter().map(|q| q.to_string()).collect(),
        }
    }
}

/// Corpus statistics, displayed as-is
pub type Stats = Map<String, Value>;
