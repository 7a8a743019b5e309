//! # headerstamp
//!
//! A tool that stamps a standardized copyright header onto every source file
//! in a directory tree.
//!
//! `headerstamp` decides each file's comment syntax from its interpreter
//! directive (`#!`) or, failing that, its extension. Files that already carry
//! the notice in their first lines are left alone, so repeated runs are
//! idempotent. Writes go through a temporary file that is renamed over the
//! original, keeping the original's permissions.
//!
//! ## Features
//!
//! * Directive-first language detection with longest-match pattern resolution
//! * Decorated banners sized to the notice, in each language's comment syntax
//! * Pruning of excluded directories before they are descended into
//! * A preview (dry run) mode that classifies everything and writes nothing
//! * Per-file failure isolation: one bad file never stops the run
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use headerstamp::config::HeaderConfig;
//! use headerstamp::processor::{Processor, ProcessorConfig};
//! use headerstamp::report::MemoryReporter;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = HeaderConfig::load(Path::new(".headerstamp.toml"))?;
//!
//!     let processor = Processor::new(ProcessorConfig {
//!         dry_run: false,
//!         ..ProcessorConfig::new(config)
//!     })?;
//!
//!     let reporter = MemoryReporter::new();
//!     let stats = processor.process(Path::new("src"), &reporter)?;
//!
//!     println!("{} files updated, {} already stamped", stats.updated, stats.passed);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - The classification and rewrite pipeline
//! * [`config`] - Header configuration loading and validation
//! * [`report`] - Outcomes, statistics and the reporter seam
//! * [`logging`] - Console output, log files and tracing setup

pub mod config;
pub mod diff;
pub mod logging;
pub mod notice_detection;
pub mod output;
pub mod processor;
pub mod report;
pub mod text_probe;
