//! Directory scaffolding
//!
//! Creates the fixed project skeleton. Creation is recursive and idempotent;
//! an already-existing directory is a success. Any real creation failure is
//! fatal to the whole pipeline, because every later step assumes the tree.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Outcome for one scaffold directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirStatus {
    /// Path relative to the target root.
    pub path: String,
    /// True if this run created the directory, false if it already existed.
    pub created: bool,
}

/// Ensure every directory in `dirs` exists under `root`, in declared order.
pub async fn ensure_tree(root: &Path, dirs: &[&str]) -> Result<Vec<DirStatus>> {
    let mut statuses = Vec::with_capacity(dirs.len());

    for dir in dirs {
        let full = root.join(dir);
        if full.is_dir() {
            statuses.push(DirStatus {
                path: dir.to_string(),
                created: false,
            });
            continue;
        }
        if full.exists() {
            anyhow::bail!("{} exists but is not a directory", full.display());
        }
        fs::create_dir_all(&full)
            .await
            .with_context(|| format!("Failed to create directory {}", full.display()))?;
        statuses.push(DirStatus {
            path: dir.to_string(),
            created: true,
        });
    }

    Ok(statuses)
}
