//! Errors raised while talking to the search API

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request timed out")]
    Timeout,
}

impl ClientError {
    /// Map reqwest timeouts onto the dedicated variant
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err)
        }
    }
}
