//! # Configuration Module
//!
//! This module loads the header configuration that drives a run: the comment
//! decoration for each language, the extension and shebang mappings used to
//! classify files, the directories to prune, and the copyright notice itself.
//!
//! Configuration can be specified with `--config`, via the
//! `HEADERSTAMP_CONFIG` environment variable, or in a `.headerstamp.toml`
//! file. Both TOML and JSON documents are accepted.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::processor::normalize_identifier;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".headerstamp.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "HEADERSTAMP_CONFIG";

/// Top-level keys every configuration document must provide.
pub const REQUIRED_KEYS: [&str; 5] = ["headers", "extensions", "shbang_patterns", "exclude_dirs", "copyright_text"];

/// Comment decoration for one language.
///
/// `prefix` opens each banner line and `suffix` closes it. Languages that
/// only have line comments leave `suffix` empty.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct HeaderStyle {
  #[serde(default)]
  pub prefix: String,

  #[serde(default)]
  pub suffix: String,
}

impl HeaderStyle {
  /// Create a line-comment style (no suffix).
  pub fn line(prefix: &str) -> Self {
    Self {
      prefix: prefix.to_string(),
      suffix: String::new(),
    }
  }

  /// Create a block-comment style.
  pub fn block(prefix: &str, suffix: &str) -> Self {
    Self {
      prefix: prefix.to_string(),
      suffix: suffix.to_string(),
    }
  }
}

/// The configuration document as written on disk.
///
/// Every key is optional here so that validation can report all missing keys
/// at once instead of stopping at the first one.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
  headers: Option<HashMap<String, HeaderStyle>>,
  extensions: Option<HashMap<String, String>>,
  shbang_patterns: Option<BTreeMap<String, String>>,
  exclude_dirs: Option<Vec<String>>,
  copyright_text: Option<String>,
}

/// Validated, immutable configuration for a run.
#[derive(Debug, Clone)]
pub struct HeaderConfig {
  /// Header decoration per language tag.
  pub headers: HashMap<String, HeaderStyle>,

  /// Lower-cased file extension (without the dot) to language tag.
  pub extensions: HashMap<String, String>,

  /// `(language tag, pattern)` pairs, longest pattern first, ties broken by
  /// lexical order of the pattern.
  pub shbang_patterns: Vec<(String, String)>,

  /// Directory names that are never descended into.
  pub exclude_dirs: HashSet<String>,

  /// The literal notice inserted into headers and searched for in files.
  pub copyright_text: String,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// No config file was found by discovery.
  #[error("No configuration file found (tried --config, $HEADERSTAMP_CONFIG and .headerstamp.toml)")]
  NotFound,

  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// The config file contains invalid JSON.
  #[error("Failed to parse config file '{path}': {source}")]
  JsonParseError { path: PathBuf, source: serde_json::Error },

  /// One or more required top-level keys are absent.
  #[error("Missing required configuration keys: {}", .0.join(", "))]
  MissingKeys(Vec<String>),

  /// A value is present but unusable.
  #[error("Invalid configuration for '{key}': {message}")]
  Invalid { key: String, message: String },
}

/// Document syntax, selected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
  Toml,
  Json,
}

impl ConfigFormat {
  fn from_path(path: &Path) -> Self {
    match path.extension().and_then(|e| e.to_str()) {
      Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
      _ => Self::Toml,
    }
  }
}

impl HeaderConfig {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file (`.json` is parsed as JSON,
  ///   anything else as TOML)
  ///
  /// # Returns
  ///
  /// The validated configuration, or an error if the file cannot be read,
  /// parsed, or is missing required keys.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    debug!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config = match ConfigFormat::from_path(path) {
      ConfigFormat::Toml => Self::from_toml_str(&content).map_err(|e| match e {
        ParseFailure::Toml(source) => ConfigError::ParseError {
          path: path.to_path_buf(),
          source,
        },
        ParseFailure::Config(e) => e,
      })?,
      ConfigFormat::Json => {
        let raw: RawConfig = serde_json::from_str(&content).map_err(|e| ConfigError::JsonParseError {
          path: path.to_path_buf(),
          source: e,
        })?;
        Self::from_raw(raw)?
      }
    };

    debug!(
      "Loaded {} header formats, {} extensions, {} shebang patterns",
      config.headers.len(),
      config.extensions.len(),
      config.shbang_patterns.len()
    );

    Ok(config)
  }

  /// Parse and validate a TOML document.
  fn from_toml_str(content: &str) -> Result<Self, ParseFailure> {
    let raw: RawConfig = toml::from_str(content).map_err(ParseFailure::Toml)?;
    Self::from_raw(raw).map_err(ParseFailure::Config)
  }

  fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
    let present = [
      raw.headers.is_some(),
      raw.extensions.is_some(),
      raw.shbang_patterns.is_some(),
      raw.exclude_dirs.is_some(),
      raw.copyright_text.is_some(),
    ];

    let (Some(headers), Some(extensions), Some(shbang_patterns), Some(exclude_dirs), Some(copyright_text)) = (
      raw.headers,
      raw.extensions,
      raw.shbang_patterns,
      raw.exclude_dirs,
      raw.copyright_text,
    ) else {
      let mut missing: Vec<String> = REQUIRED_KEYS
        .iter()
        .zip(present)
        .filter(|(_, present)| !present)
        .map(|(key, _)| key.to_string())
        .collect();
      missing.sort();
      return Err(ConfigError::MissingKeys(missing));
    };

    let config = Self::new(headers, extensions, shbang_patterns, exclude_dirs, copyright_text)?;
    config.warn_dangling_languages();
    Ok(config)
  }

  /// Build a configuration from already-parsed parts.
  ///
  /// Extension keys are lower-cased and the shebang patterns are put into
  /// resolution order.
  pub fn new(
    headers: HashMap<String, HeaderStyle>,
    extensions: HashMap<String, String>,
    shbang_patterns: impl IntoIterator<Item = (String, String)>,
    exclude_dirs: impl IntoIterator<Item = String>,
    copyright_text: String,
  ) -> Result<Self, ConfigError> {
    if copyright_text.trim().is_empty() {
      return Err(ConfigError::Invalid {
        key: "copyright_text".to_string(),
        message: "copyright text cannot be empty".to_string(),
      });
    }

    let mut normalized_extensions = HashMap::with_capacity(extensions.len());
    for (ext, language) in extensions {
      if ext.starts_with('.') {
        return Err(ConfigError::Invalid {
          key: format!("extensions.{ext}"),
          message: "extension should not include leading dot".to_string(),
        });
      }
      let key = ext.to_lowercase();
      if normalized_extensions.contains_key(&key) {
        return Err(ConfigError::Invalid {
          key: format!("extensions.{ext}"),
          message: format!("duplicates extension '{key}' when compared case-insensitively"),
        });
      }
      normalized_extensions.insert(key, language);
    }

    let mut patterns: Vec<(String, String)> = Vec::new();
    for (language, pattern) in shbang_patterns {
      if normalize_identifier(&pattern).is_empty() {
        return Err(ConfigError::Invalid {
          key: format!("shbang_patterns.{language}"),
          message: "pattern must contain at least one alphanumeric character".to_string(),
        });
      }
      patterns.push((language, pattern));
    }
    sort_patterns(&mut patterns);

    Ok(Self {
      headers,
      extensions: normalized_extensions,
      shbang_patterns: patterns,
      exclude_dirs: exclude_dirs.into_iter().collect(),
      copyright_text,
    })
  }

  /// Language tags referenced by `extensions` or `shbang_patterns` that have
  /// no `headers` entry, sorted.
  pub fn dangling_languages(&self) -> Vec<&str> {
    let mut dangling: Vec<&str> = self
      .extensions
      .values()
      .chain(self.shbang_patterns.iter().map(|(language, _)| language))
      .map(String::as_str)
      .filter(|language| !self.headers.contains_key(*language))
      .collect::<HashSet<_>>()
      .into_iter()
      .collect();
    dangling.sort_unstable();
    dangling
  }

  fn warn_dangling_languages(&self) {
    for language in self.dangling_languages() {
      warn!("Language '{}' is mapped but has no header format; its files will be skipped", language);
    }
  }

  /// Check whether a directory name is pruned from traversal.
  pub fn is_excluded_dir(&self, name: &str) -> bool {
    self.exclude_dirs.contains(name)
  }
}

/// Internal split between syntax errors and validation errors so the caller
/// can attach the path to the former.
#[derive(Debug)]
enum ParseFailure {
  Toml(toml::de::Error),
  Config(ConfigError),
}

/// Order patterns longest-first, ties broken lexically by pattern.
fn sort_patterns(patterns: &mut [(String, String)]) {
  patterns.sort_by(|(_, a), (_, b)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `HEADERSTAMP_CONFIG` environment variable
/// 3. `.headerstamp.toml` in the target root directory
/// 4. `.headerstamp.toml` in the current directory
///
/// An explicit path is returned even if it does not exist so that loading
/// reports the read failure instead of silently falling through.
pub fn discover_config_path(explicit_path: Option<&Path>, root_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    debug!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      debug!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    debug!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let root_config = root_dir.join(DEFAULT_CONFIG_FILENAME);
  if root_config.is_file() {
    debug!("Using root directory config: {}", root_config.display());
    return Some(root_config);
  }

  let cwd_config = PathBuf::from(DEFAULT_CONFIG_FILENAME);
  if cwd_config.is_file() {
    debug!("Using working directory config: {}", cwd_config.display());
    return Some(cwd_config);
  }

  debug!("No config file found");
  None
}

/// Discover and load the configuration for a run.
///
/// Unlike optional style overrides, the header configuration is mandatory:
/// failing to find it is an error.
pub fn load_config(explicit_path: Option<&Path>, root_dir: &Path) -> Result<HeaderConfig, ConfigError> {
  let path = discover_config_path(explicit_path, root_dir).ok_or(ConfigError::NotFound)?;
  HeaderConfig::load(&path)
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  const VALID_TOML: &str = concat!(
    "copyright_text = \"Copyright 2024 Acme\"\n",
    "exclude_dirs = [\".git\", \"node_modules\"]\n",
    "\n",
    "[headers.python]\n",
    "prefix = \"#\"\n",
    "\n",
    "[headers.c]\n",
    "prefix = \"/*\"\n",
    "suffix = \"*/\"\n",
    "\n",
    "[extensions]\n",
    "PY = \"python\"\n",
    "c = \"c\"\n",
    "\n",
    "[shbang_patterns]\n",
    "sh = \"sh\"\n",
    "bash = \"bash\"\n",
    "python = \"python\"\n",
  );

  #[test]
  fn test_parse_valid_config() {
    let config = HeaderConfig::from_toml_str(VALID_TOML).expect("valid config should parse");

    assert_eq!(config.copyright_text, "Copyright 2024 Acme");
    assert_eq!(config.headers.len(), 2);
    assert_eq!(config.headers.get("python"), Some(&HeaderStyle::line("#")));
    assert_eq!(config.headers.get("c"), Some(&HeaderStyle::block("/*", "*/")));
    assert!(config.is_excluded_dir("node_modules"));
    assert!(!config.is_excluded_dir("src"));
  }

  #[test]
  fn test_extension_keys_are_lowercased() {
    let config = HeaderConfig::from_toml_str(VALID_TOML).expect("valid config should parse");

    assert_eq!(config.extensions.get("py").map(String::as_str), Some("python"));
    assert!(!config.extensions.contains_key("PY"));
  }

  #[test]
  fn test_patterns_sorted_longest_first() {
    let config = HeaderConfig::from_toml_str(VALID_TOML).expect("valid config should parse");

    let patterns: Vec<&str> = config.shbang_patterns.iter().map(|(_, p)| p.as_str()).collect();
    assert_eq!(patterns, vec!["python", "bash", "sh"]);
  }

  #[test]
  fn test_pattern_ties_broken_lexically() {
    let mut patterns = vec![
      ("zsh".to_string(), "zsh".to_string()),
      ("awk".to_string(), "awk".to_string()),
      ("ksh".to_string(), "ksh".to_string()),
    ];
    sort_patterns(&mut patterns);
    let order: Vec<&str> = patterns.iter().map(|(_, p)| p.as_str()).collect();
    assert_eq!(order, vec!["awk", "ksh", "zsh"]);
  }

  #[test]
  fn test_missing_keys_are_all_reported() {
    let result = HeaderConfig::from_toml_str("copyright_text = \"Copyright\"\n");

    let Err(ParseFailure::Config(ConfigError::MissingKeys(keys))) = result else {
      panic!("expected missing keys error");
    };
    assert_eq!(keys, vec!["exclude_dirs", "extensions", "headers", "shbang_patterns"]);
  }

  #[test]
  fn test_invalid_toml_is_parse_error() {
    let result = HeaderConfig::from_toml_str("headers = [");
    assert!(matches!(result, Err(ParseFailure::Toml(_))));
  }

  #[test]
  fn test_validate_leading_dot() {
    let result = HeaderConfig::new(
      HashMap::new(),
      HashMap::from([(".py".to_string(), "python".to_string())]),
      Vec::new(),
      Vec::new(),
      "Copyright".to_string(),
    );

    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
  }

  #[test]
  fn test_validate_case_insensitive_duplicate_extension() {
    let result = HeaderConfig::new(
      HashMap::new(),
      HashMap::from([
        ("py".to_string(), "python".to_string()),
        ("PY".to_string(), "other".to_string()),
      ]),
      Vec::new(),
      Vec::new(),
      "Copyright".to_string(),
    );

    assert!(matches!(result, Err(ConfigError::Invalid { ref message, .. }) if message.contains("'py'")));
  }

  #[test]
  fn test_validate_empty_copyright_text() {
    let result = HeaderConfig::new(HashMap::new(), HashMap::new(), Vec::new(), Vec::new(), "  ".to_string());

    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
  }

  #[test]
  fn test_validate_pattern_without_alphanumerics() {
    let result = HeaderConfig::new(
      HashMap::new(),
      HashMap::new(),
      vec![("odd".to_string(), "--".to_string())],
      Vec::new(),
      "Copyright".to_string(),
    );

    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
  }

  #[test]
  fn test_dangling_languages() {
    let config = HeaderConfig::new(
      HashMap::from([("python".to_string(), HeaderStyle::line("#"))]),
      HashMap::from([
        ("py".to_string(), "python".to_string()),
        ("rb".to_string(), "ruby".to_string()),
      ]),
      vec![("perl".to_string(), "perl".to_string())],
      Vec::new(),
      "Copyright".to_string(),
    )
    .expect("config should build");

    assert_eq!(config.dangling_languages(), vec!["perl", "ruby"]);
  }

  #[test]
  fn test_load_config_from_toml_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(".headerstamp.toml");
    std::fs::write(&config_path, VALID_TOML).expect("write config");

    let config = HeaderConfig::load(&config_path).expect("load should succeed");
    assert_eq!(config.headers.len(), 2);
  }

  #[test]
  fn test_load_config_from_json_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(
      &config_path,
      r##"{
        "headers": {"python": {"prefix": "#", "suffix": ""}},
        "extensions": {"py": "python"},
        "shbang_patterns": {"python": "python"},
        "exclude_dirs": [".git"],
        "copyright_text": "Copyright 2024 Acme"
      }"##,
    )
    .expect("write config");

    let config = HeaderConfig::load(&config_path).expect("load should succeed");
    assert_eq!(config.extensions.get("py").map(String::as_str), Some("python"));
    assert!(config.is_excluded_dir(".git"));
  }

  #[test]
  fn test_load_json_missing_keys() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(&config_path, r#"{"headers": {}}"#).expect("write config");

    let result = HeaderConfig::load(&config_path);
    assert!(matches!(result, Err(ConfigError::MissingKeys(ref keys)) if keys.len() == 4));
  }

  #[test]
  fn test_load_config_file_not_found() {
    let result = HeaderConfig::load(Path::new("/nonexistent/path/.headerstamp.toml"));
    assert!(matches!(
      result.expect_err("should fail"),
      ConfigError::ReadError { .. }
    ));
  }

  #[test]
  fn test_discover_config_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("custom-config.toml");
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(Some(&config_path), temp_dir.path());

    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_discover_config_root_dir() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(None, temp_dir.path());

    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_header_style_helpers() {
    let line_style = HeaderStyle::line("//");
    assert_eq!(line_style.prefix, "//");
    assert_eq!(line_style.suffix, "");

    let block_style = HeaderStyle::block("/*", "*/");
    assert_eq!(block_style.prefix, "/*");
    assert_eq!(block_style.suffix, "*/");
  }
}
