//! HTTP client for the remote paper search API

use super::api::SearchApi;
use super::error::ClientError;
use crate::config::ApiSettings;
use crate::results::{RemoteConfig, SearchPayload, Stats};
use crate::search::SearchRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP client wrapper bound to one API base URL
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a new API client with default settings
    pub fn new() -> Result<Self, ClientError> {
        Self::with_settings(&ApiSettings::default())
    }

    /// Create a new API client with custom settings
    pub fn with_settings(settings: &ApiSettings) -> Result<Self, ClientError> {
        // Reject a malformed base early rather than on the first request
        Url::parse(&settings.base_url)?;

        let user_agent = settings
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("papersearch/{}", crate::VERSION));

        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(user_agent)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeout: settings.timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    /// GET a URL and decode its JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(ClientError::from_reqwest)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl SearchApi for ApiClient {
    async fn config(&self) -> Result<RemoteConfig, ClientError> {
        self.get_json(self.endpoint("config")?).await
    }

    async fn stats(&self) -> Result<Stats, ClientError> {
        self.get_json(self.endpoint("stats")?).await
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchPayload, ClientError> {
        self.get_json(request.to_url(&self.base_url)?).await
    }
}
