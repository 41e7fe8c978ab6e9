//! Example resource generation
//!
//! Writes the starter files for the test route. Existing operator content
//! always wins: a file that is already present is reported as kept, never
//! overwritten.

use crate::fsutil;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Outcome for one example file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// Path relative to the target root.
    pub path: String,
    /// True if this run wrote the file, false if it was kept as-is.
    pub written: bool,
}

/// Ensure `dir` exists under `root`, then write each (name, content) starter
/// file that does not already exist.
pub async fn write_examples(
    root: &Path,
    dir: &str,
    files: &[(&str, &str)],
) -> Result<Vec<FileStatus>> {
    let full_dir = root.join(dir);
    fs::create_dir_all(&full_dir)
        .await
        .with_context(|| format!("Failed to create directory {}", full_dir.display()))?;

    let mut statuses = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = full_dir.join(name);
        let relative = format!("{}/{}", dir, name);
        if path.exists() {
            statuses.push(FileStatus {
                path: relative,
                written: false,
            });
            continue;
        }
        fsutil::write_atomic(&path, content).await?;
        statuses.push(FileStatus {
            path: relative,
            written: true,
        });
    }

    Ok(statuses)
}
