use std::fs::{self, File};
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::warn;

use crate::report::{Outcome, Reporter};
use crate::{info_log, verbose_log};

/// Prefix of the main log file name.
pub const MAIN_LOG_PREFIX: &str = "headerstamp";

/// Prefix of the unsupported-files log name.
pub const UNSUPPORTED_LOG_PREFIX: &str = "unsupported_files";

/// Severity written into the main log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
  Info,
  Warning,
  Error,
}

impl LogLevel {
  const fn as_str(self) -> &'static str {
    match self {
      Self::Info => "INFO",
      Self::Warning => "WARNING",
      Self::Error => "ERROR",
    }
  }
}

/// An append-only log file shared between worker threads.
struct LogFile {
  path: PathBuf,
  writer: Mutex<BufWriter<File>>,
}

impl LogFile {
  fn create(path: PathBuf) -> Result<Self> {
    let file = File::create(&path).with_context(|| format!("Failed to create log file {}", path.display()))?;
    Ok(Self {
      path,
      writer: Mutex::new(BufWriter::new(file)),
    })
  }

  fn write_line(&self, line: &str) {
    let Ok(mut writer) = self.writer.lock() else {
      return;
    };
    if let Err(e) = writeln!(writer, "{}", line) {
      warn!("Failed to write to {}: {}", self.path.display(), e);
    }
  }

  fn flush(&self) {
    if let Ok(mut writer) = self.writer.lock()
      && let Err(e) = writer.flush()
    {
      warn!("Failed to flush {}: {}", self.path.display(), e);
    }
  }
}

/// Default [`Reporter`] for the command line.
///
/// Every outcome is printed as `<path> - <STATUS>[ - detail]`: skips only in
/// verbose mode, everything else unless quiet. When a log directory is given,
/// the same lines (plus run messages and the summary) are appended to a
/// timestamped main log file. With the unsupported log enabled, files that
/// were unsupported, non-text or could not be classified are listed in a
/// separate file.
pub struct RunLog {
  main_log: Option<LogFile>,
  unsupported_log: Option<LogFile>,
}

impl RunLog {
  /// Create the log files for a run.
  ///
  /// # Parameters
  ///
  /// * `log_dir` - Directory for the main log; `None` disables it
  /// * `unsupported_log` - Whether to create the unsupported-files log, which
  ///   lands in `log_dir` or, without one, the current directory
  pub fn create(log_dir: Option<&Path>, unsupported_log: bool) -> Result<Self> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();

    if let Some(dir) = log_dir {
      fs::create_dir_all(dir).with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }

    let main_log = log_dir
      .map(|dir| LogFile::create(dir.join(format!("{MAIN_LOG_PREFIX}_{timestamp}.log"))))
      .transpose()?;

    let unsupported_log = if unsupported_log {
      let dir = log_dir.unwrap_or_else(|| Path::new("."));
      Some(LogFile::create(
        dir.join(format!("{UNSUPPORTED_LOG_PREFIX}_{timestamp}.log")),
      )?)
    } else {
      None
    };

    let run_log = Self {
      main_log,
      unsupported_log,
    };
    if let Some(path) = run_log.main_log_path() {
      run_log.message(LogLevel::Info, &format!("Main log file: {}", path.display()));
    }
    if let Some(path) = run_log.unsupported_log_path() {
      run_log.message(LogLevel::Info, &format!("Unsupported files log: {}", path.display()));
    }
    Ok(run_log)
  }

  pub fn main_log_path(&self) -> Option<&Path> {
    self.main_log.as_ref().map(|log| log.path.as_path())
  }

  pub fn unsupported_log_path(&self) -> Option<&Path> {
    self.unsupported_log.as_ref().map(|log| log.path.as_path())
  }

  /// Log a run-level message to the console and the main log.
  pub fn message(&self, level: LogLevel, message: &str) {
    match level {
      LogLevel::Info => info_log!("{}", message),
      LogLevel::Warning | LogLevel::Error => eprintln!("{}", message),
    }
    self.to_main_log(level, message);
  }

  /// Append `message` to the main log only.
  pub fn to_main_log(&self, level: LogLevel, message: &str) {
    if let Some(log) = &self.main_log {
      log.write_line(&format!(
        "{} - {} - {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        level.as_str(),
        message
      ));
    }
  }

  /// Flush buffered lines to disk.
  pub fn flush(&self) {
    for log in [&self.main_log, &self.unsupported_log].into_iter().flatten() {
      log.flush();
    }
  }
}

impl Reporter for RunLog {
  fn record(&self, path: &Path, outcome: &Outcome) {
    let line = format!("{} - {}", path.display(), outcome);

    match outcome {
      Outcome::Skipped(_) => verbose_log!("{}", line),
      Outcome::Error(_) => eprintln!("{}", line),
      _ => info_log!("{}", line),
    }

    let level = if matches!(outcome, Outcome::Error(_)) {
      LogLevel::Error
    } else {
      LogLevel::Info
    };
    self.to_main_log(level, &line);

    if let (Some(log), Outcome::Skipped(reason)) = (&self.unsupported_log, outcome)
      && reason.is_unsupported()
    {
      log.write_line(&line);
    }
  }

  fn classification_failed(&self, path: &Path, detail: &str) {
    let line = format!("{} - {}", path.display(), detail);
    verbose_log!("{}", line);
    self.to_main_log(LogLevel::Warning, &line);
    if let Some(log) = &self.unsupported_log {
      log.write_line(&line);
    }
  }
}

impl Drop for RunLog {
  fn drop(&mut self) {
    self.flush();
  }
}
