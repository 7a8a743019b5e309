//! # Header Module
//!
//! Builds the decorated copyright banner for a language:
//!
//! ```text
//! #-----------------------------------------------------------
//! # Copyright 2024 Acme
//! #-----------------------------------------------------------
//!
//! ```
//!
//! The decorative lines are never narrower than [`MIN_DECORATION_WIDTH`]
//! columns and always at least as wide as the copyright line they frame.

use crate::config::{HeaderConfig, HeaderStyle};

/// Minimum width, in characters, of the decorative lines.
pub const MIN_DECORATION_WIDTH: usize = 60;

/// Character repeated to fill the decorative lines.
const DECORATION_FILL: char = '-';

/// Render the header for `language`, or `None` when the language has no
/// configured header format.
pub fn format_header(language: &str, config: &HeaderConfig) -> Option<String> {
  let style = config.headers.get(language)?;
  Some(render_header(style, &config.copyright_text))
}

/// Render a header from a style and notice text.
///
/// The result is the decorative line, the copyright line, the decorative line
/// again, and one blank line, each terminated by `\n`.
pub fn render_header(style: &HeaderStyle, copyright_text: &str) -> String {
  let prefix = style.prefix.trim_end();
  let suffix = style.suffix.trim_start();

  let copyright_line = format!("{prefix} {copyright_text} {suffix}").trim().to_string();
  let width = MIN_DECORATION_WIDTH.max(copyright_line.chars().count());
  let fill = width.saturating_sub(prefix.chars().count() + suffix.chars().count());

  let mut decorative_line = String::with_capacity(prefix.len() + fill + suffix.len());
  decorative_line.push_str(prefix);
  decorative_line.extend(std::iter::repeat_n(DECORATION_FILL, fill));
  decorative_line.push_str(suffix);

  format!("{decorative_line}\n{copyright_line}\n{decorative_line}\n\n")
}
