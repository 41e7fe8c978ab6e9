//! apistarter CLI - interactive installer for the apistarter PHP API template

use anyhow::Result;
use clap::Parser;
use installer_core::tui::InstallArgs;
use installer_core::{InstallConfig, ProjectProfile};
use std::path::PathBuf;

/// Starter content for the test route's helper file.
const EXAMPLE_FUNCTIONS: &str = r#"<?php

/**
 * Helper functions for the test route.
 */

function test_function() {
    // Read request payloads from the decoded JSON body.
}

?>
"#;

/// Starter content for the test route itself: exercises the global JWT and
/// HTTP response helpers shipped with the template.
const EXAMPLE_INDEX: &str = r#"<?php

/**
 * Example route exercising the global JWT and response helpers.
 *
 * GET /api/test?id=123      -> issue a token
 * GET /api/test?token=<jwt> -> validate a token
 */

if ($_SERVER['REQUEST_METHOD'] === 'GET') {
    if (isset($_GET['id'])) {
        $token = jwt_generate($_GET['id']);
        echo api_response(200, "Token generated", ["jwt_token" => $token]);
    } elseif (isset($_GET['token'])) {
        $decoded = jwt_validate($_GET['token']);
        if ($decoded) {
            echo api_response(200, "Token valid", ["jwt_decoded" => $decoded]);
        } else {
            echo api_response(401, "Token invalid", null);
        }
    } else {
        echo api_response(400, "No 'id' or 'token' parameter given", null);
    }
} else {
    echo api_response(405, "Method not allowed", null);
}

?>
"#;

/// apistarter project profile
#[derive(Clone)]
pub struct PhpApiProfile;

impl ProjectProfile for PhpApiProfile {
    fn name(&self) -> &'static str {
        "apistarter"
    }

    fn display_name(&self) -> &'static str {
        "apistarter installer"
    }

    fn cli_description(&self) -> &'static str {
        "Interactive installer for the apistarter PHP API template"
    }

    fn required_files(&self) -> &'static [&'static str] {
        &["index.php", "config.php", "loader.php"]
    }

    fn scaffold_dirs(&self) -> &'static [&'static str] {
        &[
            "core",
            "core/routes",
            "core/database",
            "core/uploads",
            "core/cache",
            "core/logs",
        ]
    }

    fn stack_label(&self) -> &'static str {
        "PHP, MySQL, API"
    }

    fn example_dir(&self) -> &'static str {
        "core/routes/test"
    }

    fn example_files(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("functions.php", EXAMPLE_FUNCTIONS),
            ("index.php", EXAMPLE_INDEX),
        ]
    }

    fn installer_artifacts(&self) -> &'static [&'static str] {
        &["install.js", "install.py"]
    }

    fn test_route_path(&self) -> &'static str {
        "/api/test"
    }

    fn next_steps(&self, config: &InstallConfig) -> Vec<String> {
        let test_url = format!("{}{}", config.app_url, self.test_route_path());
        vec![
            "Configure your web server to serve the project root".to_string(),
            "Create the database if it does not exist yet".to_string(),
            format!("Test the API at {}", test_url),
            format!("Generate a JWT: {}?id=123", test_url),
            format!("Validate a JWT: {}?token=YOUR_TOKEN", test_url),
        ]
    }
}

#[derive(Parser, Debug)]
#[command(name = "apistarter")]
#[command(about = "Interactive installer for the apistarter PHP API template")]
#[command(version)]
pub struct Args {
    /// Target project directory (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Abort on the first failed step instead of continuing with errors
    #[arg(long)]
    pub strict: bool,

    /// Keep leftover installer artifacts (skip the cleanup step)
    #[arg(long = "keep-installer")]
    pub keep_installer: bool,
}

impl From<Args> for InstallArgs {
    fn from(args: Args) -> Self {
        InstallArgs {
            directory: args.directory,
            yes: args.yes,
            strict: args.strict,
            keep_installer: args.keep_installer,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // An interrupt cancels the whole run cleanly; it is never a step failure
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        eprintln!();
        eprintln!("Installation interrupted");
        std::process::exit(0);
    })
    .ok();

    let args = Args::parse();
    let profile = PhpApiProfile;

    let result = installer_core::run(&profile, args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
