//! Console output and run logs.
//!
//! Per-file lines go through [`RunLog`], which also owns the optional log
//! files. The two macros below gate plain console lines on the output mode:
//! skipped files only appear with `-v`, everything else disappears with `-q`.
//! Diagnostics use `tracing`, set up once by [`init_tracing`].

mod modes;
mod run_log;

pub use modes::{ColorMode, default_filter, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};
pub use run_log::{LogLevel, MAIN_LOG_PREFIX, RunLog, UNSUPPORTED_LOG_PREFIX};

/// `eprintln!` that only prints with `-v`.
#[macro_export]
macro_rules! verbose_log {
  ($($arg:tt)*) => {
    if $crate::logging::is_verbose() {
      eprintln!($($arg)*);
    }
  };
}

/// Yellow `println!` that is silenced by `-q`.
#[macro_export]
macro_rules! info_log {
  ($($arg:tt)*) => {
    if !$crate::logging::is_quiet() {
      $crate::logging::print_info_log(&format!($($arg)*));
    }
  };
}

#[doc(hidden)]
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
