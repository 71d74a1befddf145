//! Configuration validation and compilation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile path patterns and tokenize rewrite templates
//! - Bound-check template group references against the pattern
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Fail-closed: one bad rule rejects the whole set; a silently dropped
//!   rule would change which rule wins an overlap
//! - Validation is a pure function: RulesConfig → Result<RuleSet, Vec<...>>
//! - Everything expensive (regex compilation, template parsing) happens
//!   here, once, so the request path stays allocation-light and bounded

use crate::config::schema::{PathType, RuleDef, RulesConfig};
use crate::routing::matcher::{compile_anchored, PathMatch};
use crate::routing::rule::{Backend, IngressRule, RuleSet};
use crate::routing::template::RewriteTemplate;

/// A single semantic problem with one rule.
///
/// `rule` identifies the offender as `"<index>"` or `"<index> (<name>)"`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("rule {rule}: path must not be empty")]
    EmptyPath { rule: String },

    #[error("rule {rule}: path must start with '/'")]
    RelativePath { rule: String },

    #[error("rule {rule}: invalid pattern: {detail}")]
    InvalidPattern { rule: String, detail: String },

    #[error("rule {rule}: invalid rewrite template: {detail}")]
    BadTemplate { rule: String, detail: String },

    #[error("rule {rule}: template references group ${group} but the pattern has {available} capture group(s)")]
    GroupOutOfRange {
        rule: String,
        group: usize,
        available: usize,
    },

    #[error("rule {rule}: backend service name must not be empty")]
    EmptyService { rule: String },

    #[error("rule {rule}: backend port must not be 0")]
    ZeroPort { rule: String },

    #[error("rule {rule}: invalid host {host:?}")]
    BadHost { rule: String, host: String },
}

/// Validate every rule and compile the set.
///
/// Collects all errors across all rules; never short-circuits, so one
/// reload failure report shows every problem at once. Any error rejects
/// the entire set.
pub fn validate_and_compile(config: &RulesConfig) -> Result<RuleSet, Vec<ValidationError>> {
    let mut compiled = Vec::with_capacity(config.rules.len());
    let mut errors = Vec::new();

    for (index, def) in config.rules.iter().enumerate() {
        match compile_rule(index, def) {
            Ok(rule) => compiled.push(rule),
            Err(mut rule_errors) => errors.append(&mut rule_errors),
        }
    }

    if errors.is_empty() {
        Ok(RuleSet::new(compiled))
    } else {
        Err(errors)
    }
}

fn rule_label(index: usize, def: &RuleDef) -> String {
    match &def.name {
        Some(name) => format!("{index} ({name})"),
        None => index.to_string(),
    }
}

fn compile_rule(index: usize, def: &RuleDef) -> Result<IngressRule, Vec<ValidationError>> {
    let label = rule_label(index, def);
    let mut errors = Vec::new();

    let path = match compile_path(&label, def) {
        Ok(path) => Some(path),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let template = match &def.rewrite {
        None => None,
        Some(raw) => match RewriteTemplate::parse(raw) {
            Ok(template) => Some(template),
            Err(e) => {
                errors.push(ValidationError::BadTemplate {
                    rule: label.clone(),
                    detail: e.to_string(),
                });
                None
            }
        },
    };

    // Group references are only meaningful against a compiled pattern.
    if let (Some(path), Some(template)) = (&path, &template) {
        let available = match path {
            PathMatch::Regex(re) => re.captures_len() - 1,
            // Exact and prefix patterns capture nothing; prefix rewrite
            // appends the remainder implicitly rather than via $n.
            PathMatch::Exact(_) | PathMatch::Prefix(_) => 0,
        };
        let referenced = template.max_group();
        if referenced > available {
            errors.push(ValidationError::GroupOutOfRange {
                rule: label.clone(),
                group: referenced,
                available,
            });
        }
    }

    if def.backend.service.is_empty() {
        errors.push(ValidationError::EmptyService { rule: label.clone() });
    }
    if def.backend.port == 0 {
        errors.push(ValidationError::ZeroPort { rule: label.clone() });
    }

    let host = match &def.host {
        None => None,
        Some(host) => {
            if host.is_empty() || host.contains('/') || host.contains(char::is_whitespace) {
                errors.push(ValidationError::BadHost {
                    rule: label.clone(),
                    host: host.clone(),
                });
                None
            } else {
                Some(host.to_lowercase())
            }
        }
    };

    // a missing path always pushed an error above
    let path = match path {
        Some(path) if errors.is_empty() => path,
        _ => return Err(errors),
    };

    Ok(IngressRule {
        name: def.name.clone(),
        host,
        path,
        rewrite: template,
        backend: Backend {
            service: def.backend.service.clone(),
            port: def.backend.port,
        },
    })
}

fn compile_path(label: &str, def: &RuleDef) -> Result<PathMatch, ValidationError> {
    if def.path.is_empty() {
        return Err(ValidationError::EmptyPath {
            rule: label.to_string(),
        });
    }

    match def.path_type {
        PathType::Exact => {
            if !def.path.starts_with('/') {
                return Err(ValidationError::RelativePath {
                    rule: label.to_string(),
                });
            }
            Ok(PathMatch::Exact(def.path.clone()))
        }
        PathType::Prefix => {
            if !def.path.starts_with('/') {
                return Err(ValidationError::RelativePath {
                    rule: label.to_string(),
                });
            }
            // A trailing slash would break the segment-boundary check.
            let prefix = if def.path.len() > 1 {
                def.path.trim_end_matches('/').to_string()
            } else {
                def.path.clone()
            };
            Ok(PathMatch::Prefix(prefix))
        }
        PathType::RegexPrefix => compile_anchored(&def.path)
            .map(PathMatch::Regex)
            .map_err(|e| ValidationError::InvalidPattern {
                rule: label.to_string(),
                detail: e.to_string(),
            }),
    }
}
