//! # Report Module
//!
//! This module defines what a run produces: the per-file [`Outcome`], the
//! aggregated [`RunStatistics`], and the [`Reporter`] seam through which the
//! processor announces each outcome as it happens.
//!
//! The processor never logs outcomes itself. The binary hands it a
//! [`crate::logging::RunLog`]; library users and tests can hand it a
//! [`MemoryReporter`] and inspect what was recorded afterwards. A JSON report
//! of the whole run can be written with [`write_json_report`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

/// Why a file was left alone without being examined further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
  /// The text probe rejected the file.
  NonText,
  /// Neither the directive nor the extension mapped to a language.
  UnsupportedType,
  /// The language has no header format configured.
  NoHeaderFormat,
}

impl SkipReason {
  /// Human readable label used in log lines.
  pub const fn label(self) -> &'static str {
    match self {
      Self::NonText => "Non-text file",
      Self::UnsupportedType => "Unsupported type",
      Self::NoHeaderFormat => "No header format",
    }
  }

  /// Whether the file belongs in the unsupported-files log.
  pub const fn is_unsupported(self) -> bool {
    matches!(self, Self::NonText | Self::UnsupportedType)
  }
}

/// Result of running the pipeline on one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
  /// The file was not eligible for a header.
  Skipped(SkipReason),
  /// The file already carries the notice.
  Passed,
  /// The file would have been updated, but this is a preview run.
  DryRun,
  /// The header was written.
  Updated,
  /// The pipeline failed for this file.
  Error(String),
}

impl Outcome {
  /// Status keyword used in log lines.
  pub const fn status(&self) -> &'static str {
    match self {
      Self::Skipped(_) => "SKIPPED",
      Self::Passed => "PASSED",
      Self::DryRun => "DRY_RUN",
      Self::Updated => "UPDATED",
      Self::Error(_) => "ERROR",
    }
  }
}

impl fmt::Display for Outcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Skipped(reason) => write!(f, "{} - {}", self.status(), reason.label()),
      Self::Error(detail) => write!(f, "{} - {}", self.status(), detail),
      _ => f.write_str(self.status()),
    }
  }
}

/// Final counters for a run.
///
/// `processed` counts every regular file visited, including skipped ones.
/// Preview runs count would-be updates in `dry_run`, never in `updated`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
  pub processed: usize,
  pub updated: usize,
  pub passed: usize,
  pub errors: usize,
  pub dry_run: usize,
}

/// Thread-safe accumulator behind [`RunStatistics`].
#[derive(Debug, Default)]
pub struct StatisticsCollector {
  processed: AtomicUsize,
  updated: AtomicUsize,
  passed: AtomicUsize,
  errors: AtomicUsize,
  dry_run: AtomicUsize,
}

impl StatisticsCollector {
  pub fn new() -> Self {
    Self::default()
  }

  /// Count one visited file and its outcome.
  pub fn record(&self, outcome: &Outcome) {
    self.processed.fetch_add(1, Ordering::Relaxed);
    let counter = match outcome {
      Outcome::Passed => &self.passed,
      Outcome::Updated => &self.updated,
      Outcome::Error(_) => &self.errors,
      Outcome::DryRun => &self.dry_run,
      Outcome::Skipped(_) => return,
    };
    counter.fetch_add(1, Ordering::Relaxed);
  }

  /// Read the current counter values.
  pub fn snapshot(&self) -> RunStatistics {
    RunStatistics {
      processed: self.processed.load(Ordering::Relaxed),
      updated: self.updated.load(Ordering::Relaxed),
      passed: self.passed.load(Ordering::Relaxed),
      errors: self.errors.load(Ordering::Relaxed),
      dry_run: self.dry_run.load(Ordering::Relaxed),
    }
  }
}

/// Receives per-file outcomes while a run is in progress.
///
/// Implementations must serialize their own writes; with `--jobs` above one,
/// calls arrive from several worker threads.
pub trait Reporter: Send + Sync {
  /// Record the outcome for one file.
  fn record(&self, path: &Path, outcome: &Outcome);

  /// A file could not be classified (directive read failure or a failing text
  /// probe). The file is still recorded through [`Reporter::record`].
  fn classification_failed(&self, _path: &Path, _detail: &str) {}
}

/// One file's entry in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  pub outcome: Outcome,
}

/// Reporter that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
  records: Mutex<Vec<FileRecord>>,
  classification_failures: Mutex<Vec<(PathBuf, String)>>,
}

impl MemoryReporter {
  pub fn new() -> Self {
    Self::default()
  }

  /// All recorded files, in the order they were reported.
  pub fn records(&self) -> Vec<FileRecord> {
    self.records.lock().map(|r| r.clone()).unwrap_or_default()
  }

  /// Outcome recorded for `path`, if any.
  pub fn outcome_for(&self, path: &Path) -> Option<Outcome> {
    let records = self.records.lock().ok()?;
    records.iter().find(|r| r.path == path).map(|r| r.outcome.clone())
  }

  /// Paths and details passed to [`Reporter::classification_failed`].
  pub fn classification_failures(&self) -> Vec<(PathBuf, String)> {
    self
      .classification_failures
      .lock()
      .map(|f| f.clone())
      .unwrap_or_default()
  }
}

impl Reporter for MemoryReporter {
  fn record(&self, path: &Path, outcome: &Outcome) {
    if let Ok(mut records) = self.records.lock() {
      records.push(FileRecord {
        path: path.to_path_buf(),
        outcome: outcome.clone(),
      });
    }
  }

  fn classification_failed(&self, path: &Path, detail: &str) {
    if let Ok(mut failures) = self.classification_failures.lock() {
      failures.push((path.to_path_buf(), detail.to_string()));
    }
  }
}

/// Forwards every call to each wrapped reporter in turn.
pub struct TeeReporter<'a> {
  reporters: Vec<&'a dyn Reporter>,
}

impl<'a> TeeReporter<'a> {
  pub const fn new(reporters: Vec<&'a dyn Reporter>) -> Self {
    Self { reporters }
  }
}

impl Reporter for TeeReporter<'_> {
  fn record(&self, path: &Path, outcome: &Outcome) {
    for reporter in &self.reporters {
      reporter.record(path, outcome);
    }
  }

  fn classification_failed(&self, path: &Path, detail: &str) {
    for reporter in &self.reporters {
      reporter.classification_failed(path, detail);
    }
  }
}

/// Helper module for serializing PathBuf
mod path_serialization {
  use std::path::Path;

  use serde::Serializer;

  pub fn serialize<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  #[serde(with = "path_serialization")]
  root: &'a Path,
  dry_run: bool,
  statistics: RunStatistics,
  files: &'a [FileRecord],
}

/// Write the per-file records and statistics of a run as pretty-printed JSON.
///
/// # Parameters
///
/// * `output_path` - Where the report is written
/// * `root` - The directory that was processed
/// * `dry_run` - Whether the run was a preview
/// * `files` - Per-file records, usually from a [`MemoryReporter`]
/// * `statistics` - Final counters
pub fn write_json_report(
  output_path: &Path,
  root: &Path,
  dry_run: bool,
  files: &[FileRecord],
  statistics: RunStatistics,
) -> Result<()> {
  let report = JsonReport {
    generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    root,
    dry_run,
    statistics,
    files,
  };

  let content = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
  fs::write(output_path, content).with_context(|| format!("Failed to write report to {}", output_path.display()))
}
