//! Search request and related data models

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Document sections the backend can search over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexingField {
    Metadata,
    Introduction,
    Section,
    Roc,
}

impl IndexingField {
    pub const ALL: [IndexingField; 4] = [
        IndexingField::Metadata,
        IndexingField::Introduction,
        IndexingField::Section,
        IndexingField::Roc,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Introduction => "introduction",
            Self::Section => "section",
            Self::Roc => "roc",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Metadata => "Metadata",
            Self::Introduction => "Introduction",
            Self::Section => "Full section",
            Self::Roc => "RoC",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for IndexingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean search features
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchToggles {
    /// Use `/deep_search` instead of `/search`
    pub deep: bool,
    pub query_understanding: bool,
    pub smart_rerank: bool,
    pub use_cache: bool,
    pub social_impact: bool,
}

/// Outbound search, fixed at the moment a search starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SearchRequest {
    /// `GET /search?query=...`
    Simple { query: String },
    /// `GET /deep_search?query=...&<toggles>&indexing_fields=...`
    Deep {
        query: String,
        toggles: SearchToggles,
        indexing_fields: Vec<String>,
    },
}

impl SearchRequest {
    /// Build the request matching the current toggles
    pub fn new(query: impl Into<String>, toggles: SearchToggles, indexing_fields: &[String]) -> Self {
        let query = query.into();
        if toggles.deep {
            Self::Deep {
                query,
                toggles,
                indexing_fields: indexing_fields.to_vec(),
            }
        } else {
            Self::Simple { query }
        }
    }

    pub fn query(&self) -> &str {
        match self {
            Self::Simple { query } | Self::Deep { query, .. } => query,
        }
    }

    /// Endpoint path relative to the API base
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Simple { .. } => "search",
            Self::Deep { .. } => "deep_search",
        }
    }

    /// Query string parameters in wire order.
    ///
    /// Booleans are written as `true`/`false`; each indexing field becomes
    /// its own `indexing_fields` pair.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Simple { query } => vec![("query", query.clone())],
            Self::Deep {
                query,
                toggles,
                indexing_fields,
            } => {
                let mut params = vec![
                    ("query", query.clone()),
                    ("query_understanding", toggles.query_understanding.to_string()),
                    ("smart_rerank", toggles.smart_rerank.to_string()),
                    ("use_cache", toggles.use_cache.to_string()),
                    ("social_impact", toggles.social_impact.to_string()),
                ];
                params.extend(
                    indexing_fields
                        .iter()
                        .map(|field| ("indexing_fields", field.clone())),
                );
                params
            }
        }
    }

    /// Full request URL under `base`
    pub fn to_url(&self, base: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            base.trim_end_matches('/'),
            self.endpoint()
        ))?;
        url.query_pairs_mut().extend_pairs(self.params());
        Ok(url)
    }
}
