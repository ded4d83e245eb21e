//! Search orchestration module
//!
//! Holds the search state, builds outbound requests, and times searches
//! while they are in flight.

mod controller;
mod models;
mod state;
mod timer;

pub use controller::{PendingSearch, SearchController};
pub use models::*;
pub use state::SearchState;
pub use timer::{SearchTimer, TICK};
