//! The configuration record collected from the operator
//!
//! Every field has a documented default, so the record is always fully
//! defined by the time the pipeline starts applying steps. The record is
//! passed explicitly into each collection phase and never mutated once
//! execution begins.

/// Default project name offered when the operator just presses enter.
pub const DEFAULT_PROJECT_NAME: &str = "PROJECT_NAME";
/// Default project version.
pub const DEFAULT_VERSION: &str = "1.0";
/// Default database host.
pub const DEFAULT_DB_HOST: &str = "localhost";
/// Default database port (MySQL).
pub const DEFAULT_DB_PORT: &str = "3306";
/// Default SMTP port (submission).
pub const DEFAULT_SMTP_PORT: &str = "587";
/// Default SMTP transport security.
pub const DEFAULT_SMTP_SECURE: &str = "tls";
/// Log level used when debug mode is off.
pub const DEFAULT_LOG_LEVEL: &str = "error";
/// Log level offered as the default when debug mode is on.
pub const DEBUG_LOG_LEVEL: &str = "debug";
/// Default application URL.
pub const DEFAULT_APP_URL: &str = "http://localhost";
/// Default application timezone.
pub const DEFAULT_TIMEZONE: &str = "Africa/Kinshasa";

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: String,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT.to_string(),
            name: String::new(),
            user: String::new(),
            password: String::new(),
        }
    }
}

/// Outgoing mail settings. Only present when the operator enables SMTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub secure: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_SMTP_PORT.to_string(),
            user: String::new(),
            password: String::new(),
            secure: DEFAULT_SMTP_SECURE.to_string(),
        }
    }
}

/// Everything the installer collects before executing any step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    pub project_name: String,
    pub version: String,
    /// Creation date in dd/mm/yyyy form, computed at collection time.
    pub created_date: String,
    pub db: DbConfig,
    pub smtp: Option<SmtpConfig>,
    pub debug_mode: bool,
    pub log_level: String,
    pub app_url: String,
    pub timezone: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
            created_date: today(),
            db: DbConfig::default(),
            smtp: None,
            debug_mode: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            app_url: DEFAULT_APP_URL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl InstallConfig {
    /// The ordered replacement set applied to the template files.
    /// Tokens are substituted in this exact order.
    pub fn replacements(&self, stack_label: &str) -> Vec<(String, String)> {
        vec![
            ("PROJECT_NAME".to_string(), self.project_name.clone()),
            ("VERSION".to_string(), self.version.clone()),
            ("CREATED_DATE".to_string(), self.created_date.clone()),
            ("STACKS".to_string(), stack_label.to_string()),
        ]
    }

    /// SMTP settings, if enabled and actually pointing at a host.
    /// An enabled-but-empty host does not count as configured.
    pub fn smtp_configured(&self) -> Option<&SmtpConfig> {
        self.smtp.as_ref().filter(|s| !s.host.is_empty())
    }
}

/// Current date in dd/mm/yyyy form.
pub fn today() -> String {
    chrono::Local::now().format("%d/%m/%Y").to_string()
}

/// Normalize a free-text yes/no answer. Anything outside the affirmative
/// set (case-insensitive) is negative, including the empty string.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "oui" | "yes" | "y" | "o"
    )
}
