//! # headerstamp
//!
//! Stamps a standardized copyright banner onto source files across a
//! directory tree.

mod cli;

use std::process::ExitCode;

use crate::cli::{Cli, run};

fn main() -> ExitCode {
  let cli = Cli::parse_args();

  match run(cli.run_args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("ERROR: {e:#}");
      ExitCode::FAILURE
    }
  }
}
