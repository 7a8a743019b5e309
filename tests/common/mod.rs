#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use headerstamp::config::{HeaderConfig, HeaderStyle};
use headerstamp::processor::{Processor, ProcessorConfig};

/// Notice used by every test configuration.
pub const NOTICE: &str = "Copyright 2024 Acme";

/// The same configuration as [`test_config`], as a TOML document.
pub const CONFIG_TOML: &str = r##"
copyright_text = "Copyright 2024 Acme"
exclude_dirs = [".git", "node_modules", "build"]

[headers.python]
prefix = "#"

[headers.shell]
prefix = "#"

[headers.bash]
prefix = "#"

[headers.c]
prefix = "/*"
suffix = "*/"

[headers.text]
prefix = "//"

[extensions]
py = "python"
sh = "shell"
c = "c"
h = "c"
txt = "text"
rb = "ruby"

[shbang_patterns]
python = "python3"
shell = "sh"
bash = "bash"
"##;

/// Header configuration shared by the integration tests.
///
/// `ruby` is mapped from `.rb` but has no header format.
pub fn test_config() -> HeaderConfig {
  HeaderConfig::new(
    HashMap::from([
      ("python".to_string(), HeaderStyle::line("#")),
      ("shell".to_string(), HeaderStyle::line("#")),
      ("bash".to_string(), HeaderStyle::line("#")),
      ("c".to_string(), HeaderStyle::block("/*", "*/")),
      ("text".to_string(), HeaderStyle::line("//")),
    ]),
    HashMap::from([
      ("py".to_string(), "python".to_string()),
      ("sh".to_string(), "shell".to_string()),
      ("c".to_string(), "c".to_string()),
      ("h".to_string(), "c".to_string()),
      ("txt".to_string(), "text".to_string()),
      ("rb".to_string(), "ruby".to_string()),
    ]),
    vec![
      ("python".to_string(), "python3".to_string()),
      ("shell".to_string(), "sh".to_string()),
      ("bash".to_string(), "bash".to_string()),
    ],
    vec![".git".to_string(), "node_modules".to_string(), "build".to_string()],
    NOTICE.to_string(),
  )
  .expect("test config should build")
}

/// A processor over [`test_config`] with default components.
pub fn create_processor(dry_run: bool) -> Result<Processor> {
  Processor::new(ProcessorConfig {
    dry_run,
    ..ProcessorConfig::new(test_config())
  })
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content)?;
  Ok(path)
}

/// The header the test configuration produces for `#` line comments.
pub fn hash_header() -> String {
  let rule = format!("#{}", "-".repeat(59));
  format!("{rule}\n# {NOTICE}\n{rule}\n\n")
}
