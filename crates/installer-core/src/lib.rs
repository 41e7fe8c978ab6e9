//! Installer Core - Shared library for interactive project installers
//!
//! This library provides the core functionality for bootstrapping a project
//! tree from operator-supplied configuration: placeholder substitution in
//! existing template files, environment-file generation, directory
//! scaffolding, example resources, and cleanup of leftover installer
//! artifacts. It is designed to be used by product binaries that share the
//! pipeline but describe different target layouts.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Pure functions and filesystem steps
//!   (placeholder rendering, env rendering, scaffolding, example resources)
//! - **Layer 2: Workflow Orchestration** - `ProjectProfile` trait, the step
//!   plan, and the pipeline state machine + executor
//! - **Layer 3: CLI/TUI Interface** - cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use installer_core::{pipeline, steps, InstallConfig, ProjectProfile};
//!
//! // Define your project profile
//! #[derive(Clone)]
//! struct MyProfile;
//! impl ProjectProfile for MyProfile {
//!     fn name(&self) -> &'static str { "myproj" }
//!     // ... implement other methods
//! }
//!
//! // Use the low-level APIs
//! pipeline::check_preconditions(&MyProfile, root)?;
//! let plan = steps::plan(&steps::PlanOptions::default());
//! ```

pub mod config;
pub mod error;
mod fsutil;
pub mod pipeline;
pub mod profile;
pub mod runtime;
pub mod steps;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{render_env, DbConfig, InstallConfig, SmtpConfig};
pub use error::InstallError;
pub use pipeline::{
    check_preconditions, execute, AssumeYes, InstallReport, InstallStatus, OverwritePrompt,
    PipelineEvent, PipelineState, StepContext, StepReport,
};
pub use profile::ProjectProfile;
pub use runtime::{check_php, RuntimeInfo};
pub use steps::{plan, PlanOptions, Severity, Step, StepKind, StepOutcome};

#[cfg(feature = "tui")]
pub use tui::{run, InstallArgs};
