//! The seam between the search controller and the remote API

use super::error::ClientError;
use crate::results::{RemoteConfig, SearchPayload, Stats};
use crate::search::SearchRequest;
use async_trait::async_trait;

/// Remote paper search API
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Fetch the client configuration (recommended queries)
    async fn config(&self) -> Result<RemoteConfig, ClientError>;

    /// Fetch corpus statistics
    async fn stats(&self) -> Result<Stats, ClientError>;

    /// Run a search
    async fn search(&self, request: &SearchRequest) -> Result<SearchPayload, ClientError>;
}
