//! Rule file loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::RulesConfig;
use crate::config::validation::{validate_and_compile, ValidationError};
use crate::routing::rule::RuleSet;

/// Error type for rule loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unsupported rule file format {extension:?} (expected .toml or .json)")]
    UnsupportedFormat { extension: String },

    #[error("validation failed: {}", fmt_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn fmt_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse rule definitions from file contents, by extension.
pub fn parse_rules(contents: &str, extension: &str) -> Result<RulesConfig, ConfigError> {
    match extension {
        "toml" => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        "json" => serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        other => Err(ConfigError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

/// Load, validate, and compile a rule file.
///
/// Validation errors are returned as a batch covering every bad rule, so
/// one failed reload report is enough to fix the file in a single pass.
pub fn load_rules(path: &Path) -> Result<RuleSet, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let config = parse_rules(&contents, &extension)?;
    let rule_set = validate_and_compile(&config).map_err(ConfigError::Validation)?;

    tracing::info!(path = %path.display(), rules = rule_set.len(), "rule file loaded");
    Ok(rule_set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_and_json() {
        let toml_rules = r#"
            [[rules]]
            path = "/pay"
            rewrite = "/"
            backend = { service = "payments", port = 8080 }
        "#;
        assert_eq!(parse_rules(toml_rules, "toml").unwrap().rules.len(), 1);

        let json_rules = r#"{
            "rules": [
                { "path": "/pay", "rewrite": "/",
                  "backend": { "service": "payments", "port": 8080 } }
            ]
        }"#;
        assert_eq!(parse_rules(json_rules, "json").unwrap().rules.len(), 1);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        assert!(matches!(
            parse_rules("rules: []", "yaml"),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_validation_error_lists_every_bad_rule() {
        let contents = r#"
            [[rules]]
            name = "one"
            path = "/a/(.*)"
            path_type = "regex-prefix"
            rewrite = "/$2"
            backend = { service = "a", port = 80 }

            [[rules]]
            name = "two"
            path = "/b["
            path_type = "regex-prefix"
            backend = { service = "b", port = 80 }
        "#;
        let config = parse_rules(contents, "toml").unwrap();
        let err = validate_and_compile(&config)
            .map_err(ConfigError::Validation)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("one"));
        assert!(message.contains("two"));
    }
}
