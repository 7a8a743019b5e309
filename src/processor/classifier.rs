//! # Classifier Module
//!
//! Maps a file to a language tag: the interpreter directive on the first line
//! wins, the lower-cased extension is the fallback.

use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::directive::resolve_directive;
use super::file_io::FileIO;
use crate::config::HeaderConfig;

/// The first line of a file could not be read.
#[derive(Debug, thiserror::Error)]
#[error("Read error: {source}")]
pub struct ClassificationError {
  pub path: PathBuf,
  #[source]
  pub source: io::Error,
}

/// Resolve the language tag for `path`.
///
/// Returns `Ok(None)` when neither the directive nor the extension is mapped.
/// A failure to read the directive line is returned as an error and does not
/// fall back to the extension.
pub fn classify(path: &Path, config: &HeaderConfig) -> Result<Option<String>, ClassificationError> {
  let first_line = FileIO::read_first_line(path).map_err(|source| ClassificationError {
    path: path.to_path_buf(),
    source,
  })?;

  if let Some(language) = resolve_directive(&first_line, &config.shbang_patterns) {
    trace!("{}: directive resolved to '{}'", path.display(), language);
    return Ok(Some(language.to_string()));
  }

  let language = path
    .extension()
    .and_then(|ext| ext.to_str())
    .and_then(|ext| config.extensions.get(&ext.to_lowercase()))
    .cloned();

  if let Some(ref language) = language {
    trace!("{}: extension resolved to '{}'", path.display(), language);
  }
  Ok(language)
}
