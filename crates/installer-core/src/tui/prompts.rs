//! Charm-style CLI prompts using cliclack

use crate::config::record::{
    is_affirmative, InstallConfig, SmtpConfig, DEBUG_LOG_LEVEL, DEFAULT_APP_URL, DEFAULT_DB_HOST,
    DEFAULT_DB_PORT, DEFAULT_LOG_LEVEL, DEFAULT_PROJECT_NAME, DEFAULT_SMTP_PORT,
    DEFAULT_SMTP_SECURE, DEFAULT_TIMEZONE, DEFAULT_VERSION,
};
use crate::pipeline::{self, InstallReport, InstallStatus, OverwritePrompt, StepContext};
use crate::profile::ProjectProfile;
use crate::runtime;
use crate::steps::{self, PlanOptions, StepOutcome};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// CLI arguments for the install command
#[derive(Debug, Clone, Default)]
pub struct InstallArgs {
    /// Target project directory (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,

    /// Abort on the first failed step instead of continuing with errors
    pub strict: bool,

    /// Keep leftover installer artifacts (skip the cleanup step)
    pub keep_installer: bool,
}

/// Run the installer with interactive prompts
pub async fn run<P: ProjectProfile>(profile: &P, args: InstallArgs) -> Result<()> {
    cliclack::intro(profile.display_name())?;

    let root = resolve_root(&args)?;

    // Step 1: Precondition gate - the full target file set must exist
    // before any prompting or mutation happens.
    if let Err(e) = pipeline::check_preconditions(profile, &root) {
        cliclack::log::error(format!("{}", e))?;
        cliclack::outro_cancel("The installer cannot continue without these files")?;
        return Err(e.into());
    }
    cliclack::log::success("All required files are present")?;

    // Step 2: Advisory runtime check
    report_php_runtime()?;

    // Step 3: Collect configuration, phase by phase
    let mut config = InstallConfig::default();
    collect_project_info(&mut config)?;
    collect_database_info(&mut config)?;
    collect_smtp_info(&mut config)?;
    collect_debug_info(&mut config)?;
    collect_other_info(&mut config)?;

    // Step 4: Final confirmation
    let confirmed = if args.yes {
        true
    } else {
        let answer = prompt_text("Confirm installation? (yes/no)", "yes")?;
        is_affirmative(&answer)
    };

    if !confirmed {
        cliclack::outro("Installation cancelled")?;
        return Ok(());
    }

    // Step 5: Execute the plan
    let steps = steps::plan(&PlanOptions {
        strict: args.strict,
        keep_installer: args.keep_installer,
    });
    let ctx = StepContext {
        profile,
        root: &root,
        config: &config,
    };
    let mut prompt = CliOverwritePrompt {
        assume_yes: args.yes,
    };

    let report = pipeline::execute(&ctx, &steps, &mut prompt, |step, outcome| {
        let line = format!("{}: {}", step.name, outcome.message());
        let _ = match outcome {
            StepOutcome::Success(_) => cliclack::log::success(line),
            StepOutcome::Warning(_) => cliclack::log::warning(line),
            StepOutcome::Failed(_) => cliclack::log::error(line),
        };
    })
    .await;

    // Step 6: Summarize
    match report.status {
        InstallStatus::Completed => {
            print_summary(profile, &config, &report);
            cliclack::outro("Installation complete")?;
            Ok(())
        }
        InstallStatus::CompletedWithErrors => {
            print_summary(profile, &config, &report);
            cliclack::outro("Installation completed with errors")?;
            Ok(())
        }
        InstallStatus::Aborted => {
            cliclack::outro_cancel("Installation aborted")?;
            anyhow::bail!("a required installation step failed")
        }
    }
}

/// Interactive overwrite confirmation for generated files.
struct CliOverwritePrompt {
    assume_yes: bool,
}

impl OverwritePrompt for CliOverwritePrompt {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("the file");
        let answer = prompt_text(
            &format!("{} already exists. Overwrite it? (yes/no)", name),
            "no",
        )?;
        Ok(is_affirmative(&answer))
    }
}

fn resolve_root(args: &InstallArgs) -> Result<PathBuf> {
    let current = std::env::current_dir().context("Failed to resolve current directory")?;
    let root = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current.join(dir),
        None => current,
    };
    cliclack::log::info(format!("Target directory: {}", root.display()))?;
    Ok(root)
}

fn report_php_runtime() -> Result<()> {
    let php = runtime::check_php();
    if php.available {
        cliclack::log::success(format!(
            "PHP detected ({})",
            php.version.as_deref().unwrap_or("unknown")
        ))?;
    } else {
        cliclack::log::warning("PHP not found in PATH; the installed project needs a PHP runtime")?;
    }
    Ok(())
}

/// Show a prompt with its default, read one line, return the trimmed input
/// or the default on empty. An interrupt terminates the whole run cleanly.
fn prompt_text(label: &str, default: &str) -> Result<String> {
    let mut input = cliclack::input(label);
    if default.is_empty() {
        input = input.required(false);
    } else {
        input = input.placeholder(default).default_input(default);
    }

    let value: String = interact(input.interact())?;
    let value = value.trim();
    Ok(if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    })
}

/// An interrupted prompt (Ctrl+C or closed stdin) is operator cancellation,
/// never a step failure: terminate the process cleanly.
fn interact<T>(result: std::io::Result<T>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
            let _ = cliclack::outro_cancel("Installation interrupted");
            std::process::exit(0);
        }
        Err(e) => Err(e.into()),
    }
}

fn collect_project_info(config: &mut InstallConfig) -> Result<()> {
    cliclack::log::info("Project information")?;

    config.project_name = prompt_text("Project name", DEFAULT_PROJECT_NAME)?;
    config.version = prompt_text("Project version", DEFAULT_VERSION)?;

    cliclack::log::success(format!(
        "{} v{}, created {}",
        config.project_name, config.version, config.created_date
    ))?;
    Ok(())
}

fn collect_database_info(config: &mut InstallConfig) -> Result<()> {
    cliclack::log::info("Database configuration")?;

    config.db.host = prompt_text("Database host", DEFAULT_DB_HOST)?;
    config.db.port = prompt_text("Database port", DEFAULT_DB_PORT)?;
    config.db.name = prompt_text("Database name", "")?;
    config.db.user = prompt_text("Database user", "")?;
    config.db.password = prompt_text("Database password", "")?;
    Ok(())
}

fn collect_smtp_info(config: &mut InstallConfig) -> Result<()> {
    cliclack::log::info("SMTP configuration (outgoing mail)")?;

    let enable = prompt_text("Enable SMTP? (yes/no)", "no")?;
    if !is_affirmative(&enable) {
        cliclack::log::warning("SMTP disabled")?;
        config.smtp = None;
        return Ok(());
    }

    let mut smtp = SmtpConfig::default();
    smtp.host = prompt_text("SMTP host", "")?;
    smtp.port = prompt_text("SMTP port", DEFAULT_SMTP_PORT)?;
    smtp.user = prompt_text("SMTP user", "")?;
    smtp.password = prompt_text("SMTP password", "")?;
    smtp.secure = prompt_text("SMTP security (tls/ssl)", DEFAULT_SMTP_SECURE)?;
    config.smtp = Some(smtp);
    Ok(())
}

fn collect_debug_info(config: &mut InstallConfig) -> Result<()> {
    cliclack::log::info("Debug configuration")?;

    let enable = prompt_text("Enable debug mode? (yes/no)", "no")?;
    if is_affirmative(&enable) {
        config.debug_mode = true;
        config.log_level = prompt_text("Log level (debug/info/warning/error)", DEBUG_LOG_LEVEL)?;
    } else {
        config.debug_mode = false;
        config.log_level = DEFAULT_LOG_LEVEL.to_string();
    }

    cliclack::log::success(format!(
        "Debug mode {}",
        if config.debug_mode {
            "enabled"
        } else {
            "disabled"
        }
    ))?;
    Ok(())
}

fn collect_other_info(config: &mut InstallConfig) -> Result<()> {
    cliclack::log::info("Application configuration")?;

    config.app_url = prompt_text("Application URL", DEFAULT_APP_URL)?;
    config.timezone = prompt_text("Timezone", DEFAULT_TIMEZONE)?;
    Ok(())
}

fn print_summary<P: ProjectProfile>(profile: &P, config: &InstallConfig, report: &InstallReport) {
    println!();
    println!("  {}", "Installation summary".cyan().bold());
    println!();
    println!("  Project:  {}", config.project_name);
    println!("  Version:  {}", config.version);
    println!("  Date:     {}", config.created_date);
    println!(
        "  Test URL: {}{}",
        config.app_url,
        profile.test_route_path()
    );
    println!();
    println!("  Created structure:");
    for dir in profile.scaffold_dirs() {
        println!("    - {}/", dir);
    }

    let failures: Vec<&str> = report
        .reports
        .iter()
        .filter(|r| r.outcome.is_failure())
        .map(|r| r.name)
        .collect();
    if !failures.is_empty() {
        println!();
        println!("  {} {}", "Failed steps:".red().bold(), failures.join(", "));
    }

    println!();
    println!("  Next steps");
    println!();
    for (i, step) in profile.next_steps(config).iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();
}
