//! Installation pipeline: state machine and step executor
//!
//! The pipeline walks a fixed plan of steps, classifies each outcome
//! against the step's declared severity, and aggregates everything into an
//! install report. The state machine is pure data so it can be tested
//! without touching the console or the filesystem.

use crate::config::{env_file, InstallConfig};
use crate::error::InstallError;
use crate::profile::ProjectProfile;
use crate::steps::{cleanup, example, scaffold, templates};
use crate::steps::{Severity, Step, StepKind, StepOutcome};
use anyhow::Result;
use std::path::Path;

/// The phases of one installer run. `Aborted` is terminal and reachable
/// from every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    CollectingInput,
    AwaitingConfirmation,
    Executing(usize),
    Summarizing,
    Done,
    Aborted,
}

/// What just happened, as far as the state machine is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineEvent {
    /// All five collection phases finished.
    InputCollected,
    /// The operator affirmed the final confirmation prompt.
    Confirmed,
    /// The operator declined the final confirmation prompt.
    Declined,
    /// The current step finished; `fatal_failure` is true when the step
    /// failed and its severity is fatal.
    StepCompleted { fatal_failure: bool },
    /// The final summary was rendered.
    SummaryShown,
}

impl PipelineState {
    /// Advance the machine by one event. Any pairing not listed in the
    /// transition table aborts.
    pub fn advance(self, event: PipelineEvent, total_steps: usize) -> PipelineState {
        use PipelineEvent::*;
        use PipelineState::*;

        match (self, event) {
            (CollectingInput, InputCollected) => AwaitingConfirmation,
            (AwaitingConfirmation, Confirmed) if total_steps == 0 => Summarizing,
            (AwaitingConfirmation, Confirmed) => Executing(0),
            (AwaitingConfirmation, Declined) => Aborted,
            (Executing(_), StepCompleted {
                fatal_failure: true,
            }) => Aborted,
            (Executing(i), StepCompleted { .. }) if i + 1 == total_steps => Summarizing,
            (Executing(i), StepCompleted { .. }) => Executing(i + 1),
            (Summarizing, SummaryShown) => Done,
            _ => Aborted,
        }
    }
}

/// Overall result of a run that got past confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    Completed,
    CompletedWithErrors,
    Aborted,
}

/// One executed step plus its classified outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub name: &'static str,
    pub outcome: StepOutcome,
}

/// Everything the summary needs about an executed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub reports: Vec<StepReport>,
    pub status: InstallStatus,
}

/// Asks the operator whether an existing generated file may be replaced.
/// The prompt layer provides the interactive implementation; tests and
/// `--yes` mode use canned answers.
pub trait OverwritePrompt {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool>;
}

/// Always answers yes. Used by non-interactive runs.
pub struct AssumeYes;

impl OverwritePrompt for AssumeYes {
    fn confirm_overwrite(&mut self, _path: &Path) -> Result<bool> {
        Ok(true)
    }
}

/// Read-only context shared by every step of one run.
pub struct StepContext<'a, P: ProjectProfile> {
    pub profile: &'a P,
    pub root: &'a Path,
    pub config: &'a InstallConfig,
}

/// Verify the full target file set exists before any prompting or mutation.
pub fn check_preconditions<P: ProjectProfile>(profile: &P, root: &Path) -> Result<(), InstallError> {
    let missing: Vec<String> = profile
        .required_files()
        .iter()
        .filter(|file| !root.join(file).is_file())
        .map(|file| file.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(InstallError::MissingPreconditions(missing))
    }
}

/// Execute a plan from `Executing(0)` through `Summarizing`, reporting each
/// classified outcome to `observe` as it lands. Collection and confirmation
/// are the caller's responsibility; see [`PipelineState`].
pub async fn execute<P, O, F>(
    ctx: &StepContext<'_, P>,
    steps: &[Step],
    prompt: &mut O,
    mut observe: F,
) -> InstallReport
where
    P: ProjectProfile,
    O: OverwritePrompt,
    F: FnMut(&Step, &StepOutcome),
{
    let mut state = if steps.is_empty() {
        PipelineState::Summarizing
    } else {
        PipelineState::Executing(0)
    };
    let mut reports = Vec::with_capacity(steps.len());
    let mut had_error = false;

    while let PipelineState::Executing(i) = state {
        let step = &steps[i];
        let outcome = classify(step, run_step(ctx, step, prompt, had_error).await);

        let fatal_failure = outcome.is_failure() && step.severity == Severity::Fatal;
        if outcome.is_failure() {
            had_error = true;
        }

        observe(step, &outcome);
        reports.push(StepReport {
            name: step.name,
            outcome,
        });
        state = state.advance(PipelineEvent::StepCompleted { fatal_failure }, steps.len());
    }

    let status = match state {
        PipelineState::Aborted => InstallStatus::Aborted,
        _ if had_error => InstallStatus::CompletedWithErrors,
        _ => InstallStatus::Completed,
    };

    InstallReport { reports, status }
}

/// Demote failures of warning-only steps to warnings.
fn classify(step: &Step, outcome: StepOutcome) -> StepOutcome {
    match outcome {
        StepOutcome::Failed(msg) if step.severity == Severity::WarningOnly => {
            StepOutcome::Warning(msg)
        }
        other => other,
    }
}

async fn run_step<P, O>(
    ctx: &StepContext<'_, P>,
    step: &Step,
    prompt: &mut O,
    had_error: bool,
) -> StepOutcome
where
    P: ProjectProfile,
    O: OverwritePrompt,
{
    match step.kind {
        StepKind::UpdateTemplates => update_templates(ctx).await,
        StepKind::WriteEnvFile => write_env_file(ctx, prompt).await,
        StepKind::ScaffoldDirs => scaffold_dirs(ctx).await,
        StepKind::ExampleRoute => example_route(ctx).await,
        StepKind::Cleanup => {
            if had_error {
                // Artifacts only go away after a run with no errors.
                StepOutcome::Warning(
                    "installer artifacts kept (run completed with errors)".to_string(),
                )
            } else {
                remove_installer_artifacts(ctx).await
            }
        }
    }
}

async fn update_templates<P: ProjectProfile>(ctx: &StepContext<'_, P>) -> StepOutcome {
    let replacements = ctx.config.replacements(ctx.profile.stack_label());
    let mut updated: Vec<&str> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    for file in ctx.profile.template_files() {
        match templates::substitute_file(&ctx.root.join(file), &replacements).await {
            Ok(()) => updated.push(*file),
            Err(e) => errors.push(format!("{}: {:#}", file, e)),
        }
    }

    if errors.is_empty() {
        StepOutcome::Success(format!("updated {}", updated.join(", ")))
    } else {
        StepOutcome::Failed(errors.join("; "))
    }
}

async fn write_env_file<P, O>(ctx: &StepContext<'_, P>, prompt: &mut O) -> StepOutcome
where
    P: ProjectProfile,
    O: OverwritePrompt,
{
    let name = ctx.profile.env_file_name();
    let path = ctx.root.join(name);

    if path.exists() {
        match prompt.confirm_overwrite(&path) {
            Ok(true) => {}
            // A declined overwrite keeps the operator's file and is a success.
            Ok(false) => return StepOutcome::Success(format!("{} kept, left unmodified", name)),
            Err(e) => return StepOutcome::Failed(format!("{:#}", e)),
        }
    }

    let content = env_file::render_env(ctx.config, ctx.profile.name());
    match crate::fsutil::write_atomic(&path, &content).await {
        Ok(()) => StepOutcome::Success(format!("{} written", name)),
        Err(e) => StepOutcome::Failed(format!("{:#}", e)),
    }
}

async fn scaffold_dirs<P: ProjectProfile>(ctx: &StepContext<'_, P>) -> StepOutcome {
    match scaffold::ensure_tree(ctx.root, ctx.profile.scaffold_dirs()).await {
        Ok(statuses) => {
            let created = statuses.iter().filter(|s| s.created).count();
            StepOutcome::Success(format!(
                "{} directories ready ({} created)",
                statuses.len(),
                created
            ))
        }
        Err(e) => StepOutcome::Failed(format!("{:#}", e)),
    }
}

async fn example_route<P: ProjectProfile>(ctx: &StepContext<'_, P>) -> StepOutcome {
    match example::write_examples(ctx.root, ctx.profile.example_dir(), ctx.profile.example_files())
        .await
    {
        Ok(statuses) => {
            let written = statuses.iter().filter(|s| s.written).count();
            let kept = statuses.len() - written;
            if kept == 0 {
                StepOutcome::Success(format!("{} files written", written))
            } else {
                StepOutcome::Success(format!("{} files written, {} kept", written, kept))
            }
        }
        Err(e) => StepOutcome::Failed(format!("{:#}", e)),
    }
}

async fn remove_installer_artifacts<P: ProjectProfile>(ctx: &StepContext<'_, P>) -> StepOutcome {
    match cleanup::remove_artifacts(ctx.root, ctx.profile.installer_artifacts()).await {
        Ok(statuses) => {
            let removed = statuses.iter().filter(|s| s.removed).count();
            if removed == 0 {
                StepOutcome::Success("no installer artifacts left behind".to_string())
            } else {
                StepOutcome::Success(format!("{} artifacts removed", removed))
            }
        }
        Err(e) => StepOutcome::Failed(format!("{:#}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::{plan, PlanOptions};

    #[derive(Clone)]
    struct TestProfile;

    impl ProjectProfile for TestProfile {
        fn name(&self) -> &'static str {
            "testproj"
        }
        fn display_name(&self) -> &'static str {
            "testproj installer"
        }
        fn cli_description(&self) -> &'static str {
            "test installer"
        }
        fn required_files(&self) -> &'static [&'static str] {
            &["index.php", "config.php", "loader.php"]
        }
        fn scaffold_dirs(&self) -> &'static [&'static str] {
            &["core", "core/routes", "core/logs"]
        }
        fn stack_label(&self) -> &'static str {
            "PHP, MySQL, API"
        }
        fn example_dir(&self) -> &'static str {
            "core/routes/test"
        }
        fn example_files(&self) -> &'static [(&'static str, &'static str)] {
            &[("index.php", "<?php // example")]
        }
        fn installer_artifacts(&self) -> &'static [&'static str] {
            &["install.py"]
        }
        fn test_route_path(&self) -> &'static str {
            "/api/test"
        }
        fn next_steps(&self, _config: &InstallConfig) -> Vec<String> {
            vec![]
        }
    }

    /// Declines every overwrite prompt.
    struct Decline;

    impl OverwritePrompt for Decline {
        fn confirm_overwrite(&mut self, _path: &Path) -> Result<bool> {
            Ok(false)
        }
    }

    fn seed_target(dir: &Path) {
        for file in TestProfile.required_files() {
            std::fs::write(dir.join(file), format!("<?php // {{{{PROJECT_NAME}}}} {file}"))
                .unwrap();
        }
    }

    fn test_config() -> InstallConfig {
        let mut config = InstallConfig::default();
        config.project_name = "Demo".to_string();
        config.created_date = "01/02/2026".to_string();
        config
    }

    #[test]
    fn happy_path_transitions() {
        use PipelineEvent::*;
        use PipelineState::*;

        let total = 3;
        let mut state = CollectingInput;
        state = state.advance(InputCollected, total);
        assert_eq!(state, AwaitingConfirmation);
        state = state.advance(Confirmed, total);
        assert_eq!(state, Executing(0));
        for i in 0..total {
            state = state.advance(
                StepCompleted {
                    fatal_failure: false,
                },
                total,
            );
            if i + 1 < total {
                assert_eq!(state, Executing(i + 1));
            }
        }
        assert_eq!(state, Summarizing);
        assert_eq!(state.advance(SummaryShown, total), Done);
    }

    #[test]
    fn declined_confirmation_aborts() {
        let state = PipelineState::AwaitingConfirmation.advance(PipelineEvent::Declined, 5);
        assert_eq!(state, PipelineState::Aborted);
    }

    #[test]
    fn fatal_step_failure_aborts_mid_run() {
        let state = PipelineState::Executing(1).advance(
            PipelineEvent::StepCompleted {
                fatal_failure: true,
            },
            5,
        );
        assert_eq!(state, PipelineState::Aborted);
    }

    #[test]
    fn non_fatal_failure_keeps_executing() {
        let state = PipelineState::Executing(1).advance(
            PipelineEvent::StepCompleted {
                fatal_failure: false,
            },
            5,
        );
        assert_eq!(state, PipelineState::Executing(2));
    }

    #[test]
    fn unexpected_event_aborts() {
        let state = PipelineState::CollectingInput.advance(PipelineEvent::SummaryShown, 5);
        assert_eq!(state, PipelineState::Aborted);
    }

    #[test]
    fn preconditions_report_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.php"), "<?php").unwrap();

        let err = check_preconditions(&TestProfile, dir.path()).unwrap_err();

        assert!(err.to_string().contains("config.php"));
        assert!(err.to_string().contains("loader.php"));
        assert!(!err.to_string().contains("index.php"));
    }

    #[tokio::test]
    async fn full_run_succeeds_on_a_seeded_target() {
        let dir = tempfile::tempdir().unwrap();
        seed_target(dir.path());
        std::fs::write(dir.path().join("install.py"), "legacy installer").unwrap();

        let config = test_config();
        let ctx = StepContext {
            profile: &TestProfile,
            root: dir.path(),
            config: &config,
        };
        let steps = plan(&PlanOptions::default());
        let report = execute(&ctx, &steps, &mut AssumeYes, |_, _| {}).await;

        assert_eq!(report.status, InstallStatus::Completed);
        assert_eq!(report.reports.len(), steps.len());
        assert!(std::fs::read_to_string(dir.path().join("index.php"))
            .unwrap()
            .contains("Demo"));
        assert!(dir.path().join(".env").is_file());
        assert!(dir.path().join("core/routes/test/index.php").is_file());
        assert!(!dir.path().join("install.py").exists());
    }

    #[tokio::test]
    async fn recoverable_failure_continues_and_flags_errors() {
        let dir = tempfile::tempdir().unwrap();
        // Seed only two of three template files: substitution fails on the
        // third, but scaffolding and the example route still run.
        std::fs::write(dir.path().join("index.php"), "<?php {{PROJECT_NAME}}").unwrap();
        std::fs::write(dir.path().join("config.php"), "<?php {{VERSION}}").unwrap();

        let config = test_config();
        let ctx = StepContext {
            profile: &TestProfile,
            root: dir.path(),
            config: &config,
        };
        let steps = plan(&PlanOptions::default());
        let report = execute(&ctx, &steps, &mut AssumeYes, |_, _| {}).await;

        assert_eq!(report.status, InstallStatus::CompletedWithErrors);
        assert!(report.reports[0].outcome.is_failure());
        assert!(dir.path().join("core/routes").is_dir());
        // Cleanup was demoted to "kept" because the run had errors.
        let cleanup_report = report.reports.last().unwrap();
        assert!(matches!(cleanup_report.outcome, StepOutcome::Warning(_)));
    }

    #[tokio::test]
    async fn scaffold_failure_aborts_before_later_steps() {
        let dir = tempfile::tempdir().unwrap();
        seed_target(dir.path());
        // A file where the scaffold root should be makes creation fail.
        std::fs::write(dir.path().join("core"), "in the way").unwrap();

        let config = test_config();
        let ctx = StepContext {
            profile: &TestProfile,
            root: dir.path(),
            config: &config,
        };
        let steps = plan(&PlanOptions::default());
        let report = execute(&ctx, &steps, &mut AssumeYes, |_, _| {}).await;

        assert_eq!(report.status, InstallStatus::Aborted);
        // Templates, env file, scaffold ran; example route and cleanup did not.
        assert_eq!(report.reports.len(), 3);
    }

    #[tokio::test]
    async fn declined_env_overwrite_is_a_success() {
        let dir = tempfile::tempdir().unwrap();
        seed_target(dir.path());
        std::fs::write(dir.path().join(".env"), "operator content").unwrap();

        let config = test_config();
        let ctx = StepContext {
            profile: &TestProfile,
            root: dir.path(),
            config: &config,
        };
        let steps = plan(&PlanOptions::default());
        let report = execute(&ctx, &steps, &mut Decline, |_, _| {}).await;

        assert_eq!(report.status, InstallStatus::Completed);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".env")).unwrap(),
            "operator content"
        );
    }

    #[tokio::test]
    async fn rerun_with_same_inputs_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        seed_target(dir.path());

        let config = test_config();
        let ctx = StepContext {
            profile: &TestProfile,
            root: dir.path(),
            config: &config,
        };
        let steps = plan(&PlanOptions::default());

        execute(&ctx, &steps, &mut AssumeYes, |_, _| {}).await;
        let first_env = std::fs::read_to_string(dir.path().join(".env")).unwrap();
        let first_index = std::fs::read_to_string(dir.path().join("index.php")).unwrap();

        let report = execute(&ctx, &steps, &mut AssumeYes, |_, _| {}).await;

        assert_eq!(report.status, InstallStatus::Completed);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".env")).unwrap(),
            first_env
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("index.php")).unwrap(),
            first_index
        );
    }
}
