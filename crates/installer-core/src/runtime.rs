//! Runtime detection for PHP
//!
//! The installer only bootstraps the project tree; serving it needs a PHP
//! runtime. Detection is advisory: a missing binary is reported, never fatal.

use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Check if PHP is available
pub fn check_php() -> RuntimeInfo {
    let output = Command::new("php").arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            // `php --version` prints several lines; the first carries the version.
            let version = String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
            RuntimeInfo {
                name: "PHP",
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name: "PHP",
            version: None,
            available: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_php_is_consistent() {
        let info = check_php();
        assert_eq!(info.name, "PHP");
        // Availability and version presence always agree.
        assert_eq!(info.available, info.version.is_some());
    }
}
