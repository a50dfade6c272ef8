//! Batch validation of card ID files
//!
//! An ID file holds one card ID per line; blank lines are ignored. Directories are
//! walked for `*.ids` files and every file is checked on its own task.

use crate::card_id::{parse_card_id, CardId};
use crate::{ReadoutError, Result};
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// File extension picked up when walking directories
pub const ID_FILE_EXTENSION: &str = "ids";

/// Outcome of checking a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCheck {
    /// 1-based line number within the file
    pub line: usize,
    /// The trimmed line text
    pub input: String,
    /// Parsed card ID, or the parse error message
    pub outcome: std::result::Result<CardId, String>,
}

impl LineCheck {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok()
    }
}

impl Serialize for LineCheck {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("LineCheck", 3)?;
        state.serialize_field("line", &self.line)?;
        state.serialize_field("input", &self.input)?;
        match &self.outcome {
            Ok(id) => state.serialize_field("card_id", id)?,
            Err(msg) => state.serialize_field("error", msg)?,
        }
        state.end()
    }
}

/// All line checks for one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    pub checks: Vec<LineCheck>,
}

impl FileReport {
    /// True when every non-blank line parsed
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(LineCheck::is_valid)
    }

    /// Lines that failed to parse
    pub fn failures(&self) -> impl Iterator<Item = &LineCheck> {
        self.checks.iter().filter(|check| !check.is_valid())
    }
}

/// File names need not be UTF-8; JSON output replaces invalid bytes with U+FFFD
pub fn serialize_path_lossy<S>(path: &Path, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&path.to_string_lossy())
}

/// Check every non-blank line of an ID file's contents
pub fn check_contents(contents: &str) -> Vec<LineCheck> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let input = raw.trim();
            if input.is_empty() {
                return None;
            }
            let outcome = parse_card_id(input).map_err(|e| match e {
                ReadoutError::ParseError(msg) => msg,
                other => other.to_string(),
            });
            Some(LineCheck {
                line: idx + 1,
                input: input.to_string(),
                outcome,
            })
        })
        .collect()
}

/// Read and check a single ID file
pub async fn check_file(path: impl AsRef<Path>) -> Result<FileReport> {
    let path = path.as_ref().to_path_buf();
    let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
        ReadoutError::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to read ID file '{}': {e}", path.display()),
        ))
    })?;

    Ok(FileReport {
        checks: check_contents(&contents),
        path,
    })
}

/// Check a mix of files and directories
///
/// Directories are walked recursively for `*.ids` files. Files are checked in
/// parallel; reports come back sorted by path. Any I/O error fails the batch.
pub async fn check_paths(paths: &[PathBuf]) -> Result<Vec<FileReport>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(discover_id_files(path.clone()).await?);
        } else {
            files.push(path.clone());
        }
    }

    let tasks: Vec<_> = files
        .into_iter()
        .map(|file| tokio::spawn(check_file(file)))
        .collect();

    let mut reports = Vec::with_capacity(tasks.len());
    for task in tasks {
        // Fail fast: join errors and read errors both abort the batch
        reports.push(task.await??);
    }

    reports.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(reports)
}

/// Walk a directory tree for ID files (jwalk runs on its own rayon pool)
async fn discover_id_files(dir: PathBuf) -> Result<Vec<PathBuf>> {
    tokio::task::spawn_blocking(move || -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        for entry in jwalk::WalkDir::new(&dir).skip_hidden(true) {
            let entry = entry.map_err(|e| {
                ReadoutError::IoError(std::io::Error::other(format!(
                    "Error walking '{}': {e}",
                    dir.display()
                )))
            })?;
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().is_some_and(|ext| ext == ID_FILE_EXTENSION)
            {
                found.push(path);
            }
        }
        Ok(found)
    })
    .await?
}
