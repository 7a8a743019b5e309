//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! Reads are plain synchronous calls; the single write path goes through
//! [`AtomicRewriter`], which stages the new content in a temporary file next
//! to the target and renames it into place.

use std::fs;
use std::io::{self, BufRead as _, BufReader, BufWriter, Read as _, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::trace;

use super::content_transformer::SplitContent;

/// Maximum number of bytes read when looking for a directive line.
pub const DIRECTIVE_READ_LIMIT: u64 = 8 * 1024;

/// Prefix for staged temporary files, so stray ones are easy to spot.
const TEMP_FILE_PREFIX: &str = ".headerstamp-";

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Read the first line of a file, without its line terminator.
  ///
  /// At most [`DIRECTIVE_READ_LIMIT`] bytes are read. The line must be valid
  /// UTF-8, except for a multi-byte sequence cut by the read limit, which is
  /// dropped.
  pub fn read_first_line(path: &Path) -> io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file.take(DIRECTIVE_READ_LIMIT));
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;

    let truncated = line.len() as u64 == DIRECTIVE_READ_LIMIT && !line.ends_with(b"\n");
    let line = match String::from_utf8(line) {
      Ok(line) => line,
      Err(e) if truncated && e.utf8_error().error_len().is_none() => {
        let valid_up_to = e.utf8_error().valid_up_to();
        let mut bytes = e.into_bytes();
        bytes.truncate(valid_up_to);
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
      }
      Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
    };
    Ok(line.trim_end().to_string())
  }

  /// Read full file content.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to read
  ///
  /// # Returns
  ///
  /// The complete file content as a String.
  pub fn read_full_content(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }
}

/// Failure while replacing a file, tagged with the stage that failed.
///
/// In every case the staged temporary file has been removed and the target is
/// unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
  #[error("Failed to read metadata of '{path}': {source}")]
  Metadata { path: PathBuf, source: io::Error },

  #[error("Failed to create temporary file next to '{path}': {source}")]
  CreateTemp { path: PathBuf, source: io::Error },

  #[error("Failed to write temporary file for '{path}': {source}")]
  Write { path: PathBuf, source: io::Error },

  #[error("Failed to copy permissions to temporary file for '{path}': {source}")]
  Permissions { path: PathBuf, source: io::Error },

  #[error("Failed to replace '{path}': {source}")]
  Rename { path: PathBuf, source: io::Error },
}

/// Writes a header into an existing file.
///
/// The processor only ever mutates files through this trait, which lets tests
/// substitute a writer that fails on demand.
pub trait HeaderWriter: Send + Sync {
  /// Replace the file at `path` with `header` inserted after the directive
  /// line of `content`.
  fn write_with_header(&self, path: &Path, header: &str, content: &SplitContent<'_>) -> Result<(), RewriteError>;
}

/// Crash-safe, permission-preserving rewriter.
///
/// The new content is written to a temporary file in the target's directory
/// (same filesystem, so the final rename is atomic), given the target's
/// permissions, flushed to disk, and renamed over the target. The temporary
/// file is owned by a [`tempfile::NamedTempFile`] and is deleted on every
/// failure path.
#[derive(Debug, Default, Clone, Copy)]
pub struct AtomicRewriter;

impl AtomicRewriter {
  pub const fn new() -> Self {
    Self
  }
}

impl HeaderWriter for AtomicRewriter {
  fn write_with_header(&self, path: &Path, header: &str, content: &SplitContent<'_>) -> Result<(), RewriteError> {
    let permissions = fs::metadata(path)
      .map_err(|source| RewriteError::Metadata {
        path: path.to_path_buf(),
        source,
      })?
      .permissions();

    let parent = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    let mut staged = tempfile::Builder::new()
      .prefix(TEMP_FILE_PREFIX)
      .tempfile_in(parent)
      .map_err(|source| RewriteError::CreateTemp {
        path: path.to_path_buf(),
        source,
      })?;
    trace!("Staging {} in {}", path.display(), staged.path().display());

    write_staged(staged.as_file_mut(), header, content).map_err(|source| RewriteError::Write {
      path: path.to_path_buf(),
      source,
    })?;

    fs::set_permissions(staged.path(), permissions).map_err(|source| RewriteError::Permissions {
      path: path.to_path_buf(),
      source,
    })?;

    staged.persist(path).map_err(|e| RewriteError::Rename {
      path: path.to_path_buf(),
      source: e.error,
    })?;

    Ok(())
  }
}

fn write_staged(file: &mut fs::File, header: &str, content: &SplitContent<'_>) -> io::Result<()> {
  {
    let mut writer = BufWriter::new(&mut *file);
    if let Some(directive) = content.directive {
      writer.write_all(directive.as_bytes())?;
      writer.write_all(b"\n\n")?;
    }
    writer.write_all(header.as_bytes())?;
    writer.write_all(content.remainder.as_bytes())?;
    writer.flush()?;
  }
  file.sync_all()
}
