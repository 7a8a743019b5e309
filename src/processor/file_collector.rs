//! # File Collector Module
//!
//! This module walks the target tree and yields the regular files the
//! pipeline should visit, pruning excluded directories before descending into
//! them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Fatal problem with the traversal root.
#[derive(Debug, thiserror::Error)]
pub enum TraversalError {
  /// The root does not exist or is not a directory.
  #[error("Invalid directory: {}", .0.display())]
  InvalidRoot(PathBuf),
}

/// File collector for directory traversal.
///
/// The `FileCollector` handles:
/// - Validating the traversal root
/// - Pruning directories whose name is excluded (the root itself is exempt)
/// - Yielding regular files in a deterministic, name-sorted order
///
/// Symbolic links are never followed and never yielded.
pub struct FileCollector<'a> {
  exclude_dirs: &'a HashSet<String>,
}

impl<'a> FileCollector<'a> {
  /// Creates a new FileCollector pruning the given directory names.
  pub const fn new(exclude_dirs: &'a HashSet<String>) -> Self {
    Self { exclude_dirs }
  }

  /// Fails with [`TraversalError::InvalidRoot`] unless `root` is a directory.
  pub fn validate_root(root: &Path) -> Result<(), TraversalError> {
    if root.is_dir() {
      Ok(())
    } else {
      Err(TraversalError::InvalidRoot(root.to_path_buf()))
    }
  }

  /// Lazily walk `root`, yielding regular files.
  ///
  /// Entries that cannot be read are logged and skipped.
  pub fn walk(&self, root: &Path) -> Result<impl Iterator<Item = PathBuf> + '_, TraversalError> {
    Self::validate_root(root)?;
    debug!("Scanning directory: {}", root.display());

    let files = WalkDir::new(root)
      .follow_links(false)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| !self.is_pruned(entry))
      .filter_map(|entry| match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
          warn!("Skipping unreadable entry: {}", e);
          None
        }
      })
      .filter(|entry| entry.file_type().is_file())
      .map(DirEntry::into_path);

    Ok(files)
  }

  /// Walk `root` eagerly, returning every file in traversal order.
  pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>, TraversalError> {
    let start_time = std::time::Instant::now();
    let files: Vec<PathBuf> = self.walk(root)?.collect();
    debug!(
      "Found {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );
    Ok(files)
  }

  fn is_pruned(&self, entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
      return false;
    }

    let pruned = entry
      .file_name()
      .to_str()
      .is_some_and(|name| self.exclude_dirs.contains(name));
    if pruned {
      debug!("Pruning excluded directory: {}", entry.path().display());
    }
    pruned
  }
}

/// Converts a potentially relative path to an absolute path.
///
/// # Parameters
///
/// * `path` - The path to absolutize
///
/// # Returns
///
/// The absolute path.
pub fn absolutize_path(path: &Path) -> Result<PathBuf> {
  if path.is_absolute() {
    Ok(path.to_path_buf())
  } else {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    Ok(current_dir.join(path))
  }
}
