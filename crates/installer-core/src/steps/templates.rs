//! Placeholder substitution for the target template files
//!
//! Placeholders are delimited as `{{TOKEN}}` with an upper-case token name.
//! Substitution applies the replacement set in its declared order, then
//! refuses to write a file that still contains an unresolved placeholder.

use crate::fsutil;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Apply every `{{token}}` replacement in order, then verify no
/// placeholder-shaped text remains. Returns the unresolved token names on
/// failure.
pub fn render(content: &str, replacements: &[(String, String)]) -> Result<String, Vec<String>> {
    let mut out = content.to_string();
    for (token, value) in replacements {
        out = out.replace(&format!("{{{{{}}}}}", token), value);
    }

    let unresolved = find_placeholders(&out);
    if unresolved.is_empty() {
        Ok(out)
    } else {
        Err(unresolved)
    }
}

/// Scan for `{{IDENT}}` placeholders, where IDENT starts with an upper-case
/// letter and contains only upper-case letters, digits and underscores.
/// Returns each distinct token name once, in order of first appearance.
pub fn find_placeholders(content: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut rest = content;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else { break };
        let name = &after[..end];
        if is_token_name(name) && !found.iter().any(|f| f == name) {
            found.push(name.to_string());
        }
        rest = &after[end + 2..];
    }

    found
}

fn is_token_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Rewrite one template file in place: read it as text, substitute the
/// replacement set, write the result back atomically.
pub async fn substitute_file(path: &Path, replacements: &[(String, String)]) -> Result<()> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let rendered = render(&content, replacements).map_err(|unresolved| {
        anyhow::anyhow!(
            "Unresolved placeholders in {}: {}",
            path.display(),
            unresolved.join(", ")
        )
    })?;

    fsutil::write_atomic(path, &rendered).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacements() -> Vec<(String, String)> {
        vec![
            ("PROJECT_NAME".to_string(), "Demo".to_string()),
            ("VERSION".to_string(), "2.0".to_string()),
            ("CREATED_DATE".to_string(), "01/02/2026".to_string()),
            ("STACKS".to_string(), "PHP, MySQL, API".to_string()),
        ]
    }

    #[test]
    fn replaces_every_occurrence() {
        let content = "// {{PROJECT_NAME}} v{{VERSION}}\n$app = '{{PROJECT_NAME}}';";
        let out = render(content, &replacements()).unwrap();
        assert_eq!(out, "// Demo v2.0\n$app = 'Demo';");
    }

    #[test]
    fn unresolved_placeholder_is_an_error() {
        let content = "{{PROJECT_NAME}} built with {{UNKNOWN_TOKEN}}";
        let err = render(content, &replacements()).unwrap_err();
        assert_eq!(err, vec!["UNKNOWN_TOKEN".to_string()]);
    }

    #[test]
    fn non_token_braces_are_ignored() {
        // Lower-case or malformed brace pairs are not placeholders.
        let content = "echo \"{{not_a_token}} {{ SPACED }} {{}}\";";
        assert!(find_placeholders(content).is_empty());
        assert_eq!(render(content, &replacements()).unwrap(), content);
    }

    #[test]
    fn second_pass_is_stable() {
        let content = "name={{PROJECT_NAME}} stacks={{STACKS}}";
        let first = render(content, &replacements()).unwrap();
        let second = render(&first, &replacements()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn substitutes_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.php");
        std::fs::write(&path, "<?php // {{PROJECT_NAME}} {{VERSION}}").unwrap();

        substitute_file(&path, &replacements()).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<?php // Demo 2.0"
        );
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.php");
        let err = substitute_file(&path, &replacements()).await.unwrap_err();
        assert!(format!("{err:#}").contains("absent.php"));
    }
}
