mod common;

use std::fs;

use anyhow::Result;
use common::{NOTICE, create_processor, hash_header, write_file};
use headerstamp::report::{MemoryReporter, Outcome, SkipReason};
use tempfile::tempdir;

#[test]
fn test_crlf_content_is_preserved() -> Result<()> {
  let temp_dir = tempdir()?;
  let body = "print(1)\r\nprint(2)\r\n";
  let file = write_file(temp_dir.path(), "win.py", body)?;

  create_processor(false)?.process(temp_dir.path(), &MemoryReporter::new())?;

  assert_eq!(fs::read_to_string(&file)?, format!("{}{body}", hash_header()));
  Ok(())
}

#[test]
fn test_crlf_directive_keeps_carriage_return() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = write_file(temp_dir.path(), "win.sh", "#!/bin/sh\r\necho hi\r\n")?;

  create_processor(false)?.process(temp_dir.path(), &MemoryReporter::new())?;

  let content = fs::read_to_string(&file)?;
  assert_eq!(content, format!("#!/bin/sh\r\n\n{}echo hi\r\n", hash_header()));
  Ok(())
}

#[test]
fn test_directive_only_file_without_newline() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = write_file(temp_dir.path(), "stub", "#!/bin/sh")?;

  let reporter = MemoryReporter::new();
  create_processor(false)?.process(temp_dir.path(), &reporter)?;

  assert_eq!(reporter.outcome_for(&file), Some(Outcome::Updated));
  assert_eq!(fs::read_to_string(&file)?, format!("#!/bin/sh\n\n{}", hash_header()));
  Ok(())
}

#[test]
fn test_empty_file_is_not_text() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = write_file(temp_dir.path(), "empty.py", "")?;

  let reporter = MemoryReporter::new();
  let stats = create_processor(false)?.process(temp_dir.path(), &reporter)?;

  assert_eq!(stats.processed, 1);
  assert_eq!(stats.updated, 0);
  assert_eq!(
    reporter.outcome_for(&file),
    Some(Outcome::Skipped(SkipReason::NonText))
  );
  assert!(fs::read(&file)?.is_empty());
  Ok(())
}

#[test]
fn test_notice_only_counts_in_first_ten_lines() -> Result<()> {
  let temp_dir = tempdir()?;
  let filler = "x = 0\n".repeat(9);
  let on_tenth = write_file(temp_dir.path(), "tenth.py", format!("{filler}# {NOTICE}\n"))?;
  let on_eleventh = write_file(temp_dir.path(), "eleventh.py", format!("{filler}x = 0\n# {NOTICE}\n"))?;

  let reporter = MemoryReporter::new();
  create_processor(false)?.process(temp_dir.path(), &reporter)?;

  assert_eq!(reporter.outcome_for(&on_tenth), Some(Outcome::Passed));
  assert_eq!(reporter.outcome_for(&on_eleventh), Some(Outcome::Updated));
  assert_eq!(fs::read_to_string(&on_eleventh)?.matches(NOTICE).count(), 2);
  Ok(())
}

#[test]
fn test_notice_in_foreign_comment_style_still_passes() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = write_file(temp_dir.path(), "lib.c", format!("// {NOTICE}\nint x;\n"))?;

  let reporter = MemoryReporter::new();
  create_processor(false)?.process(temp_dir.path(), &reporter)?;

  assert_eq!(reporter.outcome_for(&file), Some(Outcome::Passed));
  Ok(())
}

#[test]
fn test_notice_detection_is_case_sensitive() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = write_file(
    temp_dir.path(),
    "shout.py",
    format!("# {}\nprint(1)\n", NOTICE.to_uppercase()),
  )?;

  let reporter = MemoryReporter::new();
  create_processor(true)?.process(temp_dir.path(), &reporter)?;

  assert_eq!(reporter.outcome_for(&file), Some(Outcome::DryRun));
  Ok(())
}

#[test]
fn test_leading_whitespace_is_not_a_directive() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = write_file(temp_dir.path(), "indented.txt", "  #!/bin/sh\necho hi\n")?;

  create_processor(false)?.process(temp_dir.path(), &MemoryReporter::new())?;

  // Falls back to the `txt` mapping and the header goes first.
  let content = fs::read_to_string(&file)?;
  assert!(content.starts_with(&format!("//{}\n// {NOTICE}\n", "-".repeat(58))));
  assert!(content.ends_with("\n\n  #!/bin/sh\necho hi\n"));
  Ok(())
}

#[test]
fn test_uppercase_extension_is_classified() -> Result<()> {
  let temp_dir = tempdir()?;
  let file = write_file(temp_dir.path(), "LEGACY.C", "int x;\n")?;

  let reporter = MemoryReporter::new();
  create_processor(true)?.process(temp_dir.path(), &reporter)?;

  assert_eq!(reporter.outcome_for(&file), Some(Outcome::DryRun));
  Ok(())
}

#[test]
fn test_excluded_root_name_is_still_processed() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path().join("build");
  let file = write_file(&root, "gen.py", "print(1)\n")?;

  let reporter = MemoryReporter::new();
  let stats = create_processor(true)?.process(&root, &reporter)?;

  assert_eq!(stats.processed, 1);
  assert_eq!(reporter.outcome_for(&file), Some(Outcome::DryRun));
  Ok(())
}
