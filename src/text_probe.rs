//! # Text Probe Module
//!
//! Decides whether a file is text before anything else looks at it. Files the
//! probe rejects are skipped as non-text and never read in full.
//!
//! Two probes are provided:
//! - [`ContentSniffer`] inspects the first [`SNIFF_LIMIT`] bytes in-process.
//! - [`MimeCommandProbe`] asks `file --mime-type -b` and accepts `text/*`.

use std::fs::File;
use std::io::Read as _;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::trace;

/// Number of leading bytes examined by [`ContentSniffer`].
pub const SNIFF_LIMIT: usize = 8 * 1024;

/// Text/binary oracle.
pub trait TextProbe: Send + Sync {
  /// Returns `true` if the file at `path` should be treated as text.
  ///
  /// An error means the probe itself failed; the caller reports the file as
  /// unsupported and treats it as non-text.
  fn is_text(&self, path: &Path) -> Result<bool>;
}

/// In-process content sniffer.
///
/// Empty files are not text, matching `file(1)` reporting `inode/x-empty`.
/// A NUL byte anywhere in the sample marks the file as binary, and the sample
/// must otherwise be valid UTF-8 (a multi-byte sequence cut off by the sample
/// limit is tolerated).
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentSniffer;

impl ContentSniffer {
  pub const fn new() -> Self {
    Self
  }

  /// Classify an in-memory sample.
  pub fn looks_like_text(sample: &[u8], truncated: bool) -> bool {
    if sample.is_empty() || sample.contains(&0) {
      return false;
    }

    match std::str::from_utf8(sample) {
      Ok(_) => true,
      // `error_len() == None` means the input ended mid-sequence.
      Err(e) => truncated && e.error_len().is_none(),
    }
  }
}

impl TextProbe for ContentSniffer {
  fn is_text(&self, path: &Path) -> Result<bool> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut sample = Vec::with_capacity(SNIFF_LIMIT);
    file
      .take(SNIFF_LIMIT as u64 + 1)
      .read_to_end(&mut sample)
      .with_context(|| format!("Failed to read {}", path.display()))?;

    let truncated = sample.len() > SNIFF_LIMIT;
    sample.truncate(SNIFF_LIMIT);

    let is_text = Self::looks_like_text(&sample, truncated);
    trace!("Sniffed {}: text={}", path.display(), is_text);
    Ok(is_text)
  }
}

/// Probe backed by the external `file` command.
#[derive(Debug, Clone)]
pub struct MimeCommandProbe {
  program: String,
}

impl MimeCommandProbe {
  pub fn new() -> Self {
    Self::with_program("file")
  }

  /// Use a different executable with the same command line interface.
  pub fn with_program(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
    }
  }
}

impl Default for MimeCommandProbe {
  fn default() -> Self {
    Self::new()
  }
}

impl TextProbe for MimeCommandProbe {
  fn is_text(&self, path: &Path) -> Result<bool> {
    let output = Command::new(&self.program)
      .args(["--mime-type", "-b"])
      .arg(path)
      .output()
      .with_context(|| format!("Failed to run '{}'", self.program))?;

    if !output.status.success() {
      bail!(
        "'{}' exited with {}: {}",
        self.program,
        output.status,
        String::from_utf8_lossy(&output.stderr).trim()
      );
    }

    let mime = String::from_utf8_lossy(&output.stdout);
    let mime = mime.trim();
    trace!("MIME type of {}: {}", path.display(), mime);
    Ok(mime.starts_with("text/"))
  }
}
