//! Removal of leftover installer artifacts
//!
//! Old distributions of the target template ship their own installer
//! scripts. After a clean run those are dead weight, so the final step
//! deletes them. An absent artifact is already-satisfied, not an error.

use anyhow::Result;
use std::path::Path;
use tokio::fs;

/// Outcome for one installer artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStatus {
    /// Path relative to the target root.
    pub path: String,
    /// True if this run deleted the file, false if it was already gone.
    pub removed: bool,
}

/// Remove each artifact under `root` that still exists. Collects removal
/// failures and reports them together instead of stopping at the first.
pub async fn remove_artifacts(root: &Path, artifacts: &[&str]) -> Result<Vec<ArtifactStatus>> {
    let mut statuses = Vec::with_capacity(artifacts.len());
    let mut failures: Vec<String> = Vec::new();

    for artifact in artifacts {
        let path = root.join(artifact);
        if !path.exists() {
            statuses.push(ArtifactStatus {
                path: artifact.to_string(),
                removed: false,
            });
            continue;
        }
        match fs::remove_file(&path).await {
            Ok(()) => statuses.push(ArtifactStatus {
                path: artifact.to_string(),
                removed: true,
            }),
            Err(e) => failures.push(format!("{}: {}", artifact, e)),
        }
    }

    if failures.is_empty() {
        Ok(statuses)
    } else {
        anyhow::bail!("Failed to remove: {}", failures.join("; "))
    }
}
