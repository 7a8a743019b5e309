//! # Output Module
//!
//! This module centralizes the user-facing console output that is not tied to
//! a single file: the start banner, the end-of-run summary, and hints.
//!
//! - **Progressive**: more detail with `-v`, silence with `-q`
//! - **Scriptable**: summary labels are stable so they can be grepped

use std::path::Path;
use std::time::Duration;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::RunStatistics;

/// Symbols used in output
pub mod symbols {
  /// Run finished without per-file errors
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Run finished with per-file errors
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

/// Print the "Stamping headers under ..." banner.
pub fn print_start_message(root: &Path, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let mode = if dry_run { "dry run" } else { "update" };
  println!(
    "=== Copyright header {} started: {} ===",
    mode.if_supports_color(Stream::Stdout, |s| s.bold()),
    root.display()
  );
}

/// The four summary lines, without colors.
///
/// These are also written to the main log file.
pub fn summary_lines(stats: &RunStatistics) -> Vec<String> {
  vec![
    format!("Total files processed: {}", stats.processed),
    format!("Files updated:         {}", stats.updated),
    format!("Files passed:          {}", stats.passed),
    format!("Files with errors:     {}", stats.errors),
  ]
}

/// Print the processing summary.
///
/// In verbose mode, the dry-run count and elapsed time are shown as well.
pub fn print_summary(stats: &RunStatistics, elapsed: Duration) {
  if is_quiet() {
    return;
  }

  println!();
  println!("=== Processing Summary ===");
  for line in summary_lines(stats) {
    println!("{}", line);
  }

  if is_verbose() {
    println!("Files previewed:       {}", stats.dry_run);
    println!("Elapsed:               {:.2}s", elapsed.as_secs_f64());
  }

  if stats.errors > 0 {
    println!(
      "{} {} {} could not be processed",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      stats.errors,
      if stats.errors == 1 { "file" } else { "files" }
    );
  } else {
    println!(
      "{} Completed without errors",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
    );
  }
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_summary_lines() {
    let stats = RunStatistics {
      processed: 12,
      updated: 3,
      passed: 4,
      errors: 1,
      dry_run: 0,
    };

    let lines = summary_lines(&stats);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Total files processed: 12");
    assert!(lines[1].starts_with("Files updated:") && lines[1].ends_with(" 3"));
    assert!(lines[2].starts_with("Files passed:") && lines[2].ends_with(" 4"));
    assert!(lines[3].starts_with("Files with errors:") && lines[3].ends_with(" 1"));
  }
}
