//! HTTP networking module
//!
//! Provides the client used to reach the remote search API.

mod api;
mod client;
mod error;

pub use api::SearchApi;
pub use client::ApiClient;
pub use error::ClientError;
