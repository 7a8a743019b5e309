//! # Content Transformer Module
//!
//! This module splits file content around the interpreter directive and
//! assembles the rewritten content, so that the header lands after any `#!`
//! line and the rest of the file is carried over byte for byte.

use super::directive::DIRECTIVE_MARKER;

/// File content split around its leading directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitContent<'a> {
  /// The directive line without its terminating newline, if the content
  /// starts with [`DIRECTIVE_MARKER`].
  pub directive: Option<&'a str>,
  /// Everything after the directive line's newline, or the whole content when
  /// there is no directive.
  pub remainder: &'a str,
}

impl<'a> SplitContent<'a> {
  /// Split `content` into its directive line and the remainder.
  ///
  /// A directive-only file without a trailing newline yields an empty
  /// remainder.
  pub fn split(content: &'a str) -> Self {
    if !content.starts_with(DIRECTIVE_MARKER) {
      return Self {
        directive: None,
        remainder: content,
      };
    }

    match content.split_once('\n') {
      Some((directive, remainder)) => Self {
        directive: Some(directive),
        remainder,
      },
      None => Self {
        directive: Some(content),
        remainder: "",
      },
    }
  }

  /// Assemble the content with `header` inserted.
  ///
  /// The directive (if any) is followed by a blank line, then the header,
  /// then the untouched remainder.
  pub fn with_header(&self, header: &str) -> String {
    let directive_len = self.directive.map_or(0, |d| d.len() + 2);
    let mut output = String::with_capacity(directive_len + header.len() + self.remainder.len());
    if let Some(directive) = self.directive {
      output.push_str(directive);
      output.push_str("\n\n");
    }
    output.push_str(header);
    output.push_str(self.remainder);
    output
  }
}
