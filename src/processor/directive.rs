//! # Directive Module
//!
//! Resolves a language tag from an interpreter directive (`#!`) line.
//!
//! The interpreter path is expanded into a set of candidate identifiers
//! (basename, version-stripped forms, and the arguments of `env`) which are
//! then matched exactly against the configured patterns in longest-first
//! order, so `bash` wins over `sh` and `python3` wins over `python`.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Marker that opens an interpreter directive.
pub const DIRECTIVE_MARKER: &str = "#!";

/// Name of the generic launcher whose arguments name the real interpreter.
const ENV_LAUNCHER: &str = "env";

static NON_ALPHANUMERIC: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("identifier regex must compile"));

/// Lower-case an identifier and strip everything that is not ASCII
/// alphanumeric.
pub fn normalize_identifier(raw: &str) -> String {
  NON_ALPHANUMERIC.replace_all(&raw.to_lowercase(), "").into_owned()
}

/// Extract the normalized candidate identifiers from a directive line.
///
/// Returns an empty set when `line` is not a directive or names no
/// interpreter.
///
/// ```
/// use headerstamp::processor::directive_candidates;
///
/// let candidates = directive_candidates("#!/usr/bin/python3.12 -u");
/// assert!(candidates.contains("python312"));
/// assert!(candidates.contains("python3"));
/// assert!(candidates.contains("python"));
/// ```
pub fn directive_candidates(line: &str) -> HashSet<String> {
  let Some(body) = line.strip_prefix(DIRECTIVE_MARKER) else {
    return HashSet::new();
  };

  let mut parts = body.split_whitespace();
  let Some(interpreter) = parts.next() else {
    return HashSet::new();
  };

  let basename = interpreter.rsplit('/').next().unwrap_or(interpreter).to_lowercase();
  let mut raw_candidates = vec![basename.clone()];

  if let Some((base, _version)) = basename.split_once('.') {
    raw_candidates.push(base.to_string());
    let unversioned = base.trim_end_matches(|c: char| c.is_ascii_digit());
    if unversioned.len() != base.len() {
      raw_candidates.push(unversioned.to_string());
    }
  }

  if basename == ENV_LAUNCHER {
    raw_candidates.extend(parts.map(str::to_string));
  }

  raw_candidates
    .iter()
    .map(|candidate| normalize_identifier(candidate))
    .filter(|candidate| !candidate.is_empty())
    .collect()
}

/// Resolve a directive line against ordered `(language, pattern)` pairs.
///
/// `patterns` must already be in resolution order (longest first); the first
/// pattern whose normalized form is one of the candidates wins.
pub fn resolve_directive<'a>(line: &str, patterns: &'a [(String, String)]) -> Option<&'a str> {
  let candidates = directive_candidates(line);
  if candidates.is_empty() {
    return None;
  }

  patterns
    .iter()
    .find(|(_, pattern)| candidates.contains(&normalize_identifier(pattern)))
    .map(|(language, _)| language.as_str())
}
