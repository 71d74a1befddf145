//! Rule lookup and rewrite.
//!
//! # Responsibilities
//! - Look up the matching rule for a request
//! - Apply the rule's rewrite template to the path
//! - Return matched result or explicit no-match
//!
//! # Design Decisions
//! - Linear scan in declaration order, first-match-wins; no best-match
//!   scoring and no prefix trie, because operators rely on declared order
//!   for overlapping rules
//! - Explicit `Outcome::NoMatch` rather than an error: unmatched traffic
//!   is a normal, high-frequency outcome
//! - Pure function of (RuleSet, RequestKey); no I/O, no locking

use crate::routing::matcher::{host_matches, PathMatch};
use crate::routing::rule::{IngressRule, RequestKey, RewriteResult, RuleSet};
use crate::routing::template::{join_rewrite, normalize_path};

/// Result of resolving one request against a rule set.
#[derive(Debug)]
pub enum Outcome<'a> {
    /// A rule matched; forward to `backend` with `rewritten_path`.
    Match(RewriteResult<'a>),
    /// No rule matched host + path. The caller decides how to surface
    /// this (typically a 404).
    NoMatch,
}

impl<'a> Outcome<'a> {
    pub fn is_match(&self) -> bool {
        matches!(self, Outcome::Match(_))
    }
}

impl RuleSet {
    /// Resolve a request to a backend and rewritten path.
    ///
    /// Rules are evaluated in declaration order; the first rule whose host
    /// and path conditions both hold wins. An empty set always yields
    /// [`Outcome::NoMatch`].
    pub fn resolve<'a>(&'a self, request: RequestKey<'_>) -> Outcome<'a> {
        let host_lower = request.host.to_lowercase();

        for (index, rule) in self.rules().iter().enumerate() {
            if !host_matches(rule.host.as_deref(), &host_lower) {
                continue;
            }
            if !rule.path.matches(request.path) {
                continue;
            }

            let rewritten_path = apply_rewrite(rule, request.path);
            tracing::trace!(
                rule = %rule.label(index),
                path = request.path,
                rewritten = %rewritten_path,
                "rule matched"
            );
            return Outcome::Match(RewriteResult {
                rule,
                rewritten_path,
                backend: &rule.backend,
            });
        }

        tracing::debug!(host = request.host, path = request.path, "no rule matched");
        Outcome::NoMatch
    }
}

/// Compute the forwarded path for a rule that already matched `path`.
fn apply_rewrite(rule: &IngressRule, path: &str) -> String {
    let template = match &rule.rewrite {
        Some(template) => template,
        None => return path.to_string(),
    };

    match &rule.path {
        // Validation guarantees literal-only templates for exact rules.
        PathMatch::Exact(_) => normalize_path(template.expand_literal()),
        PathMatch::Prefix(prefix) => {
            let remainder = if prefix == "/" {
                path
            } else {
                // Matched, so the strip cannot fail; fall back defensively.
                path.strip_prefix(prefix.as_str()).unwrap_or(path)
            };
            join_rewrite(&template.expand_literal(), remainder)
        }
        PathMatch::Regex(re) => match re.captures(path) {
            Some(caps) => normalize_path(template.expand(&caps)),
            // Unreachable after a positive is_match; forward unchanged.
            None => path.to_string(),
        },
    }
}
