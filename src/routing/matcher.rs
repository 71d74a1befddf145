//! Rule matching logic.
//!
//! # Responsibilities
//! - Match host (exact match, case-insensitive)
//! - Match path by type: exact, prefix, or anchored regex
//! - Combine host + path conditions with AND semantics
//!
//! # Design Decisions
//! - Host matching is case-insensitive (per HTTP spec)
//! - Path matching is case-sensitive
//! - Prefix `/foo` matches `/foo` and `/foo/...`, never `/foobar`
//! - Regex patterns are anchored at position 0 at compile time, so request
//!   evaluation never scans past the path start

use regex::Regex;

/// Compiled path condition for one rule.
#[derive(Debug, Clone)]
pub enum PathMatch {
    /// Full-string equality.
    Exact(String),
    /// Literal prefix on segment boundaries.
    Prefix(String),
    /// Regex anchored at the start of the path.
    Regex(Regex),
}

impl PathMatch {
    /// Returns true if the request path satisfies this condition.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathMatch::Exact(expected) => path == expected,
            PathMatch::Prefix(prefix) => prefix_matches(prefix, path),
            PathMatch::Regex(re) => re.is_match(path),
        }
    }
}

/// Prefix semantics: the path is the prefix itself, or continues past it
/// at a `/` boundary. The root prefix `/` matches everything.
fn prefix_matches(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return path.starts_with('/');
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Host condition: an unset rule host is a wildcard; otherwise the rule's
/// (pre-lowercased) host must equal the request host case-insensitively.
pub fn host_matches(rule_host: Option<&str>, request_host_lower: &str) -> bool {
    match rule_host {
        None => true,
        Some(expected) => expected == request_host_lower,
    }
}

/// Anchor a user-supplied pattern at the start of the path.
pub fn compile_anchored(pattern: &str) -> Result<Regex, regex::Error> {
    if pattern.starts_with('^') {
        Regex::new(pattern)
    } else {
        Regex::new(&format!("^{pattern}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let m = PathMatch::Exact("/health".into());
        assert!(m.matches("/health"));
        assert!(!m.matches("/health/"));
        assert!(!m.matches("/healthz"));
    }

    #[test]
    fn test_prefix_match() {
        let m = PathMatch::Prefix("/api".into());
        assert!(m.matches("/api"));
        assert!(m.matches("/api/v1"));
        assert!(!m.matches("/apiary"));
        assert!(!m.matches("/images"));
    }

    #[test]
    fn test_root_prefix_matches_everything() {
        let m = PathMatch::Prefix("/".into());
        assert!(m.matches("/"));
        assert!(m.matches("/anything/at/all"));
    }

    #[test]
    fn test_regex_anchored_at_start() {
        let re = compile_anchored("/service/([^/]+)/(.*)").unwrap();
        let m = PathMatch::Regex(re);
        assert!(m.matches("/service/users/list"));
        // an unanchored pattern would match here; ours must not
        assert!(!m.matches("/v2/service/users/list"));
    }

    #[test]
    fn test_regex_need_not_consume_whole_path() {
        let re = compile_anchored("/pay").unwrap();
        assert!(PathMatch::Regex(re).matches("/payments/extra"));
    }

    #[test]
    fn test_host_matching() {
        assert!(host_matches(None, "example.com"));
        assert!(host_matches(Some("example.com"), "example.com"));
        assert!(!host_matches(Some("example.com"), "other.com"));
    }

    #[test]
    fn test_compile_anchored_keeps_existing_caret() {
        let re = compile_anchored("^/x$").unwrap();
        assert_eq!(re.as_str(), "^/x$");
        let re = compile_anchored("/x").unwrap();
        assert_eq!(re.as_str(), "^/x");
    }
}
