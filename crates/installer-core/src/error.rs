//! Typed errors for the installer precondition gate

use thiserror::Error;

/// Errors that abort the installer before any prompting or mutation happens.
#[derive(Debug, Error)]
pub enum InstallError {
    /// One or more of the fixed target files is missing from the project root.
    /// The installer refuses to run against a partial tree.
    #[error("missing required files: {}", .0.join(", "))]
    MissingPreconditions(Vec<String>),
}
