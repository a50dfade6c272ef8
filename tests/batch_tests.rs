//! Batch ID file checking tests
//!
//! Runs the async checker against the fixture files in `test_ids/` and against
//! scratch directories created for the test.

use readout_card_id::batch::{check_contents, check_file, check_paths};
use readout_card_id::{CardId, ReadoutError, Result};
use std::path::PathBuf;

fn fixture(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_ids").join(rel)
}

/// Create an empty scratch directory unique to this test
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cardid-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn test_check_single_valid_file() -> Result<()> {
    let report = check_file(fixture("valid/all_slots.ids")).await?;
    assert!(report.is_valid());
    assert_eq!(report.checks.len(), 8);
    assert_eq!(report.checks[7].outcome, Ok(CardId::MAX));
    Ok(())
}

#[tokio::test]
async fn test_check_mixed_file_reports_line() -> Result<()> {
    let report = check_file(fixture("invalid/mixed.ids")).await?;
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].line, 3);
    assert_eq!(failures[0].input, "slot 3");
    Ok(())
}

#[tokio::test]
async fn test_check_directory_is_sorted() -> Result<()> {
    let reports = check_paths(&[fixture("invalid")]).await?;
    let names: Vec<_> = reports
        .iter()
        .map(|r| r.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["malformed.ids", "mixed.ids", "out_of_range.ids"]);
    assert!(reports.iter().all(|r| !r.is_valid()));
    Ok(())
}

#[tokio::test]
async fn test_directory_walk_skips_other_extensions() -> Result<()> {
    let dir = scratch_dir("walk");
    std::fs::create_dir_all(dir.join("nested"))?;
    std::fs::write(dir.join("a.ids"), "#1\n")?;
    std::fs::write(dir.join("nested").join("b.ids"), "#2\n9\n")?;
    std::fs::write(dir.join("notes.txt"), "not an id file\n")?;

    let reports = check_paths(&[dir.clone()]).await?;
    assert_eq!(reports.len(), 2);
    assert!(reports[0].is_valid());
    assert_eq!(reports[1].failures().count(), 1);

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let result = check_paths(&[fixture("does_not_exist.ids")]).await;
    assert!(matches!(result, Err(ReadoutError::IoError(_))));
}

#[test]
fn test_check_contents_handles_crlf() {
    let checks = check_contents("#1\r\n#2\r\n");
    assert!(checks.iter().all(|c| c.is_valid()));
    assert_eq!(checks[1].input, "#2");
}
