//! Project profile trait for installer binaries
//!
//! This trait defines the interface an installer binary implements to
//! describe the project tree it bootstraps: which files must already exist,
//! which directories get scaffolded, and what starter content is written.

use crate::config::InstallConfig;

/// Configuration trait for installable project layouts
///
/// Each product binary implements this trait to define:
/// - Product identity (name, display name)
/// - The fixed target file set and scaffold tree
/// - Example resources and leftover installer artifacts
/// - Post-install instructions
pub trait ProjectProfile: Clone + Send + Sync + 'static {
    /// Internal product name (used for generated-file provenance headers)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Files that must already exist at the target root before anything runs.
    /// A partial set is a fatal precondition failure.
    fn required_files(&self) -> &'static [&'static str];

    /// Files rewritten in place by placeholder substitution.
    /// Defaults to the required file set.
    fn template_files(&self) -> &'static [&'static str] {
        self.required_files()
    }

    /// Directory skeleton created under the target root, in declared order.
    fn scaffold_dirs(&self) -> &'static [&'static str];

    /// Descriptive stack label substituted for the `{{STACKS}}` placeholder.
    fn stack_label(&self) -> &'static str;

    /// Name of the generated environment file at the target root.
    fn env_file_name(&self) -> &'static str {
        ".env"
    }

    /// Directory holding the example resource, relative to the target root.
    fn example_dir(&self) -> &'static str;

    /// Example starter files as (relative path, content) pairs.
    /// Pre-existing files are never overwritten.
    fn example_files(&self) -> &'static [(&'static str, &'static str)];

    /// Leftover installer artifacts removed by the cleanup step.
    /// An absent artifact is already-satisfied, not an error.
    fn installer_artifacts(&self) -> &'static [&'static str];

    /// Route path of the example resource, for the summary's test URL.
    fn test_route_path(&self) -> &'static str;

    /// Generate the "next steps" instructions shown after installation.
    fn next_steps(&self, config: &InstallConfig) -> Vec<String>;
}
