//! Rendering of the generated `.env` artifact

use super::record::InstallConfig;

/// Render the configuration record into `.env` content.
///
/// Section order is fixed: provenance header, database, SMTP, application.
/// The SMTP keys are emitted only when an SMTP host was actually collected;
/// the database and application sections are always present. Rendering the
/// same record twice produces byte-identical output.
pub fn render_env(config: &InstallConfig, generator: &str) -> String {
    let mut out = String::new();

    out.push_str("# Environment configuration\n");
    out.push_str(&format!("# Generated by {}\n", generator));
    out.push_str(&format!("# Project: {}\n", config.project_name));
    out.push_str(&format!("# Date: {}\n\n", config.created_date));

    out.push_str("# Database configuration\n");
    out.push_str(&format!("DB_HOST={}\n", config.db.host));
    out.push_str(&format!("DB_PORT={}\n", config.db.port));
    out.push_str(&format!("DB_NAME={}\n", config.db.name));
    out.push_str(&format!("DB_USER={}\n", config.db.user));
    out.push_str(&format!("DB_PASS={}\n\n", config.db.password));

    out.push_str("# SMTP configuration\n");
    if let Some(smtp) = config.smtp_configured() {
        out.push_str(&format!("SMTP_HOST={}\n", smtp.host));
        out.push_str(&format!("SMTP_PORT={}\n", smtp.port));
        out.push_str(&format!("SMTP_USER={}\n", smtp.user));
        out.push_str(&format!("SMTP_PASS={}\n", smtp.password));
        out.push_str(&format!("SMTP_SECURE={}\n", smtp.secure));
    }
    out.push('\n');

    out.push_str("# Application configuration\n");
    out.push_str(&format!("APP_URL={}\n", config.app_url));
    out.push_str(&format!(
        "DEBUG_MODE={}\n",
        if config.debug_mode { "true" } else { "false" }
    ));
    out.push_str(&format!("LOG_LEVEL={}\n", config.log_level));
    out.push_str(&format!("TIMEZONE={}\n", config.timezone));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::record::SmtpConfig;

    fn base_config() -> InstallConfig {
        let mut config = InstallConfig::default();
        config.project_name = "Demo".to_string();
        config.created_date = "01/02/2026".to_string();
        config.db.name = "demo_db".to_string();
        config.db.user = "demo".to_string();
        config
    }

    #[test]
    fn smtp_section_omitted_without_host() {
        let config = base_config();
        let env = render_env(&config, "apistarter");
        assert!(!env.contains("SMTP_HOST="));
        assert!(!env.lines().any(|l| l.starts_with("SMTP_")));
        // The section header stays, only the keys are gated.
        assert!(env.contains("# SMTP configuration\n"));
    }

    #[test]
    fn smtp_section_emitted_with_host() {
        let mut config = base_config();
        config.smtp = Some(SmtpConfig {
            host: "mail.example.com".to_string(),
            user: "mailer".to_string(),
            password: "secret".to_string(),
            ..SmtpConfig::default()
        });
        let env = render_env(&config, "apistarter");
        assert!(env.contains("SMTP_HOST=mail.example.com\n"));
        assert!(env.contains("SMTP_PORT=587\n"));
        assert!(env.contains("SMTP_USER=mailer\n"));
        assert!(env.contains("SMTP_PASS=secret\n"));
        assert!(env.contains("SMTP_SECURE=tls\n"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let config = base_config();
        assert_eq!(
            render_env(&config, "apistarter"),
            render_env(&config, "apistarter")
        );
    }

    #[test]
    fn sections_keep_fixed_order() {
        let env = render_env(&base_config(), "apistarter");
        let db = env.find("# Database configuration").unwrap();
        let smtp = env.find("# SMTP configuration").unwrap();
        let app = env.find("# Application configuration").unwrap();
        assert!(db < smtp && smtp < app);
        assert!(env.ends_with("TIMEZONE=Africa/Kinshasa\n"));
    }
}
