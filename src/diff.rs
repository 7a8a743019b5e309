//! # Diff Module
//!
//! Renders the change a preview run would make to a file as a line diff, so
//! `--show-diff` can show exactly where the header would land.

use std::fmt::Write as _;
use std::path::Path;

use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Manages diff rendering for preview runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiffManager {
  /// Whether to print diffs for files that would be updated
  pub show_diff: bool,
}

impl DiffManager {
  pub const fn new(show_diff: bool) -> Self {
    Self { show_diff }
  }

  /// Render a diff between `original` and `new` as plain text.
  ///
  /// Only changed lines and the lines immediately around them are kept, so a
  /// large file produces a short preview.
  pub fn render_diff(path: &Path, original: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(original, new);
    let mut rendered = String::new();
    let _ = writeln!(rendered, "Diff for {}:", path.display());

    for group in diff.grouped_ops(1) {
      for op in group {
        for change in diff.iter_changes(&op) {
          let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
          };
          let _ = write!(rendered, "{}{}", sign, change);
          if change.missing_newline() {
            rendered.push('\n');
          }
        }
      }
    }

    rendered
  }

  /// Print the diff to stderr if diffs are enabled.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) {
    if !self.show_diff {
      return;
    }

    for line in Self::render_diff(path, original, new).lines() {
      if line.starts_with('+') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.green()));
      } else if line.starts_with('-') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.red()));
      } else {
        eprintln!("{}", line);
      }
    }
    eprintln!();
  }
}
