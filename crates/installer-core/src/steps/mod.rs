//! Installation steps as data
//!
//! This module provides:
//! - The step data model: kind, declared severity, and outcome
//! - The fixed ordered plan the pipeline executes
//! - The per-step operations (templates, env file, scaffold, example, cleanup)

pub mod cleanup;
pub mod example;
pub mod scaffold;
pub mod templates;

/// How a step's failure affects the rest of the run. Severity is declared
/// on the step itself, not embedded in pipeline control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Failure aborts the pipeline immediately.
    Fatal,
    /// Failure is recorded, the run continues and finishes "with errors".
    RecoverableContinue,
    /// Failure is demoted to a warning and never affects overall status.
    WarningOnly,
}

/// The operations the installer knows how to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    UpdateTemplates,
    WriteEnvFile,
    ScaffoldDirs,
    ExampleRoute,
    Cleanup,
}

/// One entry of the installation plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub name: &'static str,
    pub kind: StepKind,
    pub severity: Severity,
}

/// What a step reports back to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Success(String),
    Warning(String),
    Failed(String),
}

impl StepOutcome {
    pub fn message(&self) -> &str {
        match self {
            StepOutcome::Success(m) | StepOutcome::Warning(m) | StepOutcome::Failed(m) => m,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }
}

/// Options shaping the installation plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    /// Upgrade recoverable steps to fatal (abort on the first failure).
    pub strict: bool,
    /// Drop the cleanup step, keeping leftover installer artifacts.
    pub keep_installer: bool,
}

/// Build the fixed ordered plan. Scaffolding is always fatal; template and
/// env-file failures are recoverable unless `strict`; the example route and
/// cleanup only ever warn.
pub fn plan(options: &PlanOptions) -> Vec<Step> {
    let recoverable = if options.strict {
        Severity::Fatal
    } else {
        Severity::RecoverableContinue
    };

    let mut steps = vec![
        Step {
            name: "Update template files",
            kind: StepKind::UpdateTemplates,
            severity: recoverable,
        },
        Step {
            name: "Write environment file",
            kind: StepKind::WriteEnvFile,
            severity: recoverable,
        },
        Step {
            name: "Create directory structure",
            kind: StepKind::ScaffoldDirs,
            severity: Severity::Fatal,
        },
        Step {
            name: "Create example route",
            kind: StepKind::ExampleRoute,
            severity: Severity::WarningOnly,
        },
    ];

    if !options.keep_installer {
        steps.push(Step {
            name: "Remove installer artifacts",
            kind: StepKind::Cleanup,
            severity: Severity::WarningOnly,
        });
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_order_and_severities() {
        let steps = plan(&PlanOptions::default());
        let kinds: Vec<StepKind> = steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::UpdateTemplates,
                StepKind::WriteEnvFile,
                StepKind::ScaffoldDirs,
                StepKind::ExampleRoute,
                StepKind::Cleanup,
            ]
        );
        assert_eq!(steps[0].severity, Severity::RecoverableContinue);
        assert_eq!(steps[2].severity, Severity::Fatal);
        assert_eq!(steps[3].severity, Severity::WarningOnly);
    }

    #[test]
    fn strict_upgrades_recoverable_steps_only() {
        let steps = plan(&PlanOptions {
            strict: true,
            keep_installer: false,
        });
        assert_eq!(steps[0].severity, Severity::Fatal);
        assert_eq!(steps[1].severity, Severity::Fatal);
        // Warning-only steps stay warnings even in strict mode.
        assert_eq!(steps[3].severity, Severity::WarningOnly);
        assert_eq!(steps[4].severity, Severity::WarningOnly);
    }

    #[test]
    fn keep_installer_drops_cleanup() {
        let steps = plan(&PlanOptions {
            strict: false,
            keep_installer: true,
        });
        assert!(steps.iter().all(|s| s.kind != StepKind::Cleanup));
        assert_eq!(steps.len(), 4);
    }
}
