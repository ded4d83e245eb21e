//! Result types and derived views
//!
//! Defines the records returned by the search API and the pure
//! sort/pagination derivations computed over them.

mod types;
mod view;

pub use types::*;
pub use view::*;
