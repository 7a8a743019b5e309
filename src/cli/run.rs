//! # Run Command
//!
//! This module implements the single command of the tool: stamp headers onto
//! every eligible file under a directory, or preview doing so.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Args, ValueEnum};
use tracing::{debug, warn};

use headerstamp::config::load_config;
use headerstamp::diff::DiffManager;
use headerstamp::logging::{ColorMode, LogLevel, RunLog, init_tracing, set_quiet, set_verbose};
use headerstamp::output::{print_hint, print_start_message, print_summary, summary_lines};
use headerstamp::processor::{FileCollector, Processor, ProcessorConfig, absolutize_path};
use headerstamp::report::{MemoryReporter, Reporter, TeeReporter, write_json_report};
use headerstamp::text_probe::{ContentSniffer, MimeCommandProbe, TextProbe};

/// Whether files are written or only classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
  /// Classify every file and report what would change, without writing
  #[default]
  #[value(alias = "dry-run")]
  Dryrun,
  /// Insert headers into files that need one
  Update,
}

/// How text files are told apart from binary ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TextProbeKind {
  /// Inspect the first 8 KiB of each file
  #[default]
  Sniff,
  /// Ask `file --mime-type` and accept text/* types
  Mime,
}

impl TextProbeKind {
  fn build(self) -> Box<dyn TextProbe> {
    match self {
      Self::Sniff => Box::new(ContentSniffer::new()),
      Self::Mime => Box::new(MimeCommandProbe::new()),
    }
  }
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
  /// Root directory to process recursively
  #[arg(value_name = "DIRECTORY")]
  pub directory: PathBuf,

  /// Run mode
  #[arg(value_enum, value_name = "RUN_MODE", default_value_t = RunMode::Dryrun)]
  pub run_mode: RunMode,

  /// Create a separate log listing unsupported, non-text and unclassifiable
  /// files
  #[arg(short = 's', long)]
  pub unsupported_log: bool,

  /// Path to config file (default: $HEADERSTAMP_CONFIG, then
  /// .headerstamp.toml in DIRECTORY or the current directory)
  #[arg(short, long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Directory for the timestamped main log (and the unsupported log)
  #[arg(long, value_name = "DIR")]
  pub log_dir: Option<PathBuf>,

  /// Show a diff of the change each file would receive (dry run only)
  #[arg(long)]
  pub show_diff: bool,

  /// Write a JSON report of every file's outcome to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Text/binary detection strategy
  #[arg(long, value_enum, default_value_t = TextProbeKind::Sniff)]
  pub text_probe: TextProbeKind,

  /// Number of worker threads (0 uses every CPU)
  #[arg(short, long, default_value_t = 1)]
  pub jobs: usize,

  /// Increase verbosity (-v shows skipped files and debug logs, -vv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl RunArgs {
  const fn dry_run(&self) -> bool {
    matches!(self.run_mode, RunMode::Dryrun)
  }

  fn effective_jobs(&self) -> usize {
    if self.jobs == 0 { num_cpus::get() } else { self.jobs }
  }
}

/// Run the command with the given arguments
///
/// An invalid root, a configuration error or a failure to start processing is
/// returned as an error; per-file failures are only counted.
pub fn run(args: RunArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let root_path = absolutize_path(&args.directory)?;
  let root = root_path.as_path();
  FileCollector::validate_root(root)?;
  let header_config = load_config(args.config.as_deref(), root)?;

  let dry_run = args.dry_run();
  if args.show_diff && !dry_run {
    warn!("--show-diff only applies to dry runs; ignoring it");
  }

  let run_log = RunLog::create(args.log_dir.as_deref(), args.unsupported_log)?;
  run_log.to_main_log(LogLevel::Info, "=== Copyright Header Update Process Started ===");
  print_start_message(root, dry_run);

  let jobs = args.effective_jobs();
  debug!("Using {} worker(s)", jobs);

  let processor = Processor::new(ProcessorConfig {
    dry_run,
    jobs,
    text_probe: Some(args.text_probe.build()),
    diff_manager: Some(DiffManager::new(args.show_diff && dry_run)),
    ..ProcessorConfig::new(header_config)
  })?;

  let memory = MemoryReporter::new();
  let mut reporters: Vec<&dyn Reporter> = vec![&run_log];
  if args.report_json.is_some() {
    reporters.push(&memory);
  }
  let reporter = TeeReporter::new(reporters);

  let start = Instant::now();
  let stats = processor.process(root, &reporter).inspect_err(|e| {
    run_log.to_main_log(LogLevel::Error, &format!("{e:#}"));
  })?;
  let elapsed = start.elapsed();

  run_log.to_main_log(LogLevel::Info, "=== Processing Summary ===");
  for line in summary_lines(&stats) {
    run_log.to_main_log(LogLevel::Info, &line);
  }
  run_log.to_main_log(LogLevel::Info, "=== Process Completed ===");
  run_log.flush();
  print_summary(&stats, elapsed);

  if let Some(report_path) = &args.report_json {
    write_json_report(report_path, root, dry_run, &memory.records(), stats)?;
    debug!("Report written to {}", report_path.display());
  }

  if dry_run && stats.dry_run > 0 {
    print_hint(&format!(
      "{} {} would be updated; run again with 'update' to write the headers",
      stats.dry_run,
      if stats.dry_run == 1 { "file" } else { "files" }
    ));
  }

  Ok(())
}
