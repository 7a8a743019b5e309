//! # Processor Module
//!
//! This module contains the core functionality for walking a directory tree,
//! classifying each file, and inserting the copyright header where one is
//! owed.
//!
//! The module is organized into several submodules:
//! - [`directive`] - Interpreter directive (`#!`) parsing and pattern matching
//! - [`classifier`] - Language resolution from directive or extension
//! - [`header`] - Header banner rendering
//! - [`content_transformer`] - Splitting content around the directive line
//! - [`file_io`] - File reading and the atomic rewriter
//! - [`file_collector`] - Directory traversal and pruning
//!
//! The [`Processor`] struct is the main entry point, running every file
//! through the same pipeline: text probe, classification, header lookup,
//! notice detection, then the rewrite (or a preview of it).

mod classifier;
mod content_transformer;
mod directive;
mod file_collector;
mod file_io;
mod header;

use std::path::Path;

use anyhow::{Context, Result, bail};
pub use classifier::{ClassificationError, classify};
pub use content_transformer::SplitContent;
pub use directive::{DIRECTIVE_MARKER, directive_candidates, normalize_identifier, resolve_directive};
pub use file_collector::{FileCollector, TraversalError, absolutize_path};
pub use file_io::{AtomicRewriter, FileIO, HeaderWriter, RewriteError};
pub use header::{MIN_DECORATION_WIDTH, format_header, render_header};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::HeaderConfig;
use crate::diff::DiffManager;
use crate::notice_detection::{CopyrightDetector, NoticeDetector};
use crate::report::{Outcome, Reporter, RunStatistics, SkipReason, StatisticsCollector};
use crate::text_probe::{ContentSniffer, TextProbe};

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub config: HeaderConfig,

  // Behavior flags
  pub dry_run: bool,
  pub jobs: usize,

  // Optional components
  pub text_probe: Option<Box<dyn TextProbe>>,
  pub detector: Option<Box<dyn CopyrightDetector>>,
  pub writer: Option<Box<dyn HeaderWriter>>,
  pub diff_manager: Option<DiffManager>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with the header configuration and sensible
  /// defaults: a single-threaded preview run with the default components.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     dry_run: false,
  ///     ..ProcessorConfig::new(header_config)
  /// }
  /// ```
  pub fn new(config: HeaderConfig) -> Self {
    Self {
      config,
      dry_run: true,
      jobs: 1,
      text_probe: None,
      detector: None,
      writer: None,
      diff_manager: None,
    }
  }
}

/// Processor for stamping copyright headers onto files.
///
/// The `Processor` is responsible for:
/// - Traversing the tree with excluded directories pruned
/// - Deciding, per file, whether a header is owed
/// - Writing the header atomically, or previewing it in dry-run mode
/// - Counting outcomes and passing each one to the [`Reporter`]
///
/// A failure while handling one file is recorded as [`Outcome::Error`] and
/// never stops the run.
pub struct Processor {
  /// Immutable header configuration shared by every file
  config: HeaderConfig,

  /// Whether to classify only, without writing
  dry_run: bool,

  /// Number of worker threads for the per-file pipeline
  jobs: usize,

  text_probe: Box<dyn TextProbe>,

  detector: Box<dyn CopyrightDetector>,

  writer: Box<dyn HeaderWriter>,

  /// Manager for rendering previews in dry-run mode
  diff_manager: DiffManager,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if `jobs` is zero.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    if config.jobs == 0 {
      bail!("Number of jobs must be at least 1");
    }

    Ok(Self {
      config: config.config,
      dry_run: config.dry_run,
      jobs: config.jobs,
      text_probe: config.text_probe.unwrap_or_else(|| Box::new(ContentSniffer::new())),
      detector: config.detector.unwrap_or_else(|| Box::new(NoticeDetector::new())),
      writer: config.writer.unwrap_or_else(|| Box::new(AtomicRewriter::new())),
      diff_manager: config.diff_manager.unwrap_or_default(),
    })
  }

  /// The header configuration this processor runs with.
  pub const fn config(&self) -> &HeaderConfig {
    &self.config
  }

  /// Processes every regular file under `root`.
  ///
  /// With one job, files are handled as the walk yields them. With more, the
  /// file list is collected first and handed to a bounded rayon pool; each
  /// path appears once, so no two workers touch the same file.
  ///
  /// # Returns
  ///
  /// The final counters for the run.
  ///
  /// # Errors
  ///
  /// Returns an error only if `root` is not a directory (a
  /// [`TraversalError`]) or the worker pool cannot be built. Per-file
  /// failures are counted, not returned.
  pub fn process(&self, root: &Path, reporter: &dyn Reporter) -> Result<RunStatistics> {
    let collector = FileCollector::new(&self.config.exclude_dirs);
    let statistics = StatisticsCollector::new();

    let visit = |path: &Path| {
      let outcome = self.process_file(path, reporter);
      statistics.record(&outcome);
      reporter.record(path, &outcome);
    };

    if self.jobs == 1 {
      for path in collector.walk(root)? {
        visit(&path);
      }
    } else {
      let files = collector.collect(root)?;
      debug!("Processing {} files with {} workers", files.len(), self.jobs);

      let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(self.jobs)
        .build()
        .context("Failed to build worker pool")?;
      pool.install(|| files.par_iter().for_each(|path| visit(path)));
    }

    Ok(statistics.snapshot())
  }

  /// Run the pipeline on a single file.
  ///
  /// Any failure is converted into [`Outcome::Error`] carrying the full error
  /// chain.
  pub fn process_file(&self, path: &Path, reporter: &dyn Reporter) -> Outcome {
    match self.run_pipeline(path, reporter) {
      Ok(outcome) => outcome,
      Err(e) => {
        debug!("Error processing {}: {:#}", path.display(), e);
        Outcome::Error(format!("{e:#}"))
      }
    }
  }

  fn run_pipeline(&self, path: &Path, reporter: &dyn Reporter) -> Result<Outcome> {
    match self.text_probe.is_text(path) {
      Ok(true) => {}
      Ok(false) => return Ok(Outcome::Skipped(SkipReason::NonText)),
      Err(e) => {
        reporter.classification_failed(path, &format!("File type detection failed: {e:#}"));
        return Ok(Outcome::Skipped(SkipReason::NonText));
      }
    }

    let language = match classify(path, &self.config) {
      Ok(Some(language)) => language,
      Ok(None) => return Ok(Outcome::Skipped(SkipReason::UnsupportedType)),
      Err(e) => {
        reporter.classification_failed(path, &e.to_string());
        return Ok(Outcome::Skipped(SkipReason::UnsupportedType));
      }
    };

    let Some(header) = format_header(&language, &self.config) else {
      trace!("Skipping: {} (no header format for '{}')", path.display(), language);
      return Ok(Outcome::Skipped(SkipReason::NoHeaderFormat));
    };

    let content = FileIO::read_full_content(path)?;
    if self.detector.has_notice(&content, &self.config.copyright_text) {
      return Ok(Outcome::Passed);
    }

    let split = SplitContent::split(&content);
    if self.dry_run {
      if self.diff_manager.show_diff {
        self.diff_manager.display_diff(path, &content, &split.with_header(&header));
      }
      return Ok(Outcome::DryRun);
    }

    self.writer.write_with_header(path, &header, &split)?;
    Ok(Outcome::Updated)
  }
}
