//! Collected configuration and generated configuration artifacts
//!
//! This module provides:
//! - The configuration record filled in by the prompt phases
//! - Rendering of the record into the generated `.env` artifact

pub mod env_file;
pub mod record;

pub use env_file::render_env;
pub use record::{is_affirmative, today, DbConfig, InstallConfig, SmtpConfig};
