//! Terminal display module
//!
//! Turns completion text into styled terminal output.

mod formatter;
mod terminal;

pub use formatter::{format_markdown, truncate_lines, Palette};
pub use terminal::colors_enabled;
