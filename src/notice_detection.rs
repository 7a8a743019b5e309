//! # Notice Detection Module
//!
//! This module contains the interface and default implementation for deciding
//! whether a file already carries the copyright notice. The processor only
//! talks to the [`CopyrightDetector`] trait, so the detection strategy can be
//! swapped without touching the pipeline.

/// Number of leading lines searched for the notice.
pub const NOTICE_SEARCH_LINES: usize = 10;

/// Trait for copyright notice detectors.
pub trait CopyrightDetector: Send + Sync {
  /// Checks if `content` already carries `notice`.
  ///
  /// # Parameters
  ///
  /// * `content` - The full file content
  /// * `notice` - The configured copyright text
  ///
  /// # Returns
  ///
  /// `true` if the notice is already present, `false` otherwise.
  fn has_notice(&self, content: &str, notice: &str) -> bool;
}

/// Default detector: a literal, case-sensitive substring search over the first
/// [`NOTICE_SEARCH_LINES`] lines.
///
/// A notice further down the file does not count, so a file that merely
/// mentions the text in its body still gets a header.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoticeDetector;

impl NoticeDetector {
  pub const fn new() -> Self {
    Self
  }
}

impl CopyrightDetector for NoticeDetector {
  fn has_notice(&self, content: &str, notice: &str) -> bool {
    content
      .split('\n')
      .take(NOTICE_SEARCH_LINES)
      .any(|line| line.contains(notice))
  }
}
