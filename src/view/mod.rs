//! Terminal presentation of the search view
//!
//! Renders controller state as text and parses interactive commands.

mod color;
mod commands;
mod render;

pub use color::{color_for_social_score, Hsl};
pub use commands::{Command, CommandError, Feature, HELP};
pub use render::{render_header, render_options, render_page, render_stats, RenderOptions};
