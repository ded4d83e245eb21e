//! papersearch: a client for a remote paper search API
//!
//! The [`SearchController`] holds the state of a search view: query,
//! feature toggles, results of the last search, paging and sort order, and
//! an elapsed-time ticker while a search is in flight. The `view` module
//! renders that state for the terminal.

pub mod config;
pub mod network;
pub mod results;
pub mod search;
pub mod view;

pub use config::Settings;
pub use network::{ApiClient, ClientError, SearchApi};
pub use results::{ResultItem, SortMode};
pub use search::{SearchController, SearchRequest};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
