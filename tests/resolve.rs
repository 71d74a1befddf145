//! End-to-end resolution tests: rule file text in, rewrite decisions out.

use ingress_rewrite::config::{parse_rules, validate_and_compile};
use ingress_rewrite::routing::{Outcome, RequestKey, RuleSet};

fn compile(toml_rules: &str) -> RuleSet {
    let config = parse_rules(toml_rules, "toml").expect("parse");
    validate_and_compile(&config).expect("validate")
}

fn rewrite(set: &RuleSet, host: &str, path: &str) -> Option<(String, String)> {
    match set.resolve(RequestKey { host, path }) {
        Outcome::Match(r) => Some((r.rewritten_path, r.backend.service.clone())),
        Outcome::NoMatch => None,
    }
}

#[test]
fn rewrite_target_walkthrough() {
    // the classic rewrite-target setup: strip one prefix, capture another
    let set = compile(
        r#"
        [[rules]]
        name = "pay"
        path = "/pay"
        path_type = "prefix"
        rewrite = "/"
        backend = { service = "payments", port = 8080 }

        [[rules]]
        name = "svc"
        path = "/service/([^/]+)/(.*)"
        path_type = "regex-prefix"
        rewrite = "/api/$1/$2"
        backend = { service = "dispatch", port = 80 }

        [[rules]]
        name = "something"
        path = "/something(/|$)(.*)"
        path_type = "regex-prefix"
        rewrite = "/$2"
        backend = { service = "app", port = 3000 }
        "#,
    );

    assert_eq!(
        rewrite(&set, "h", "/pay/checkout"),
        Some(("/checkout".into(), "payments".into()))
    );
    assert_eq!(
        rewrite(&set, "h", "/service/users/list"),
        Some(("/api/users/list".into(), "dispatch".into()))
    );
    assert_eq!(
        rewrite(&set, "h", "/something"),
        Some(("/".into(), "app".into()))
    );
    assert_eq!(
        rewrite(&set, "h", "/something/foo/bar"),
        Some(("/foo/bar".into(), "app".into()))
    );
    assert_eq!(rewrite(&set, "h", "/unmatched"), None);
}

#[test]
fn host_scoped_rules() {
    let set = compile(
        r#"
        [[rules]]
        host = "a.example.com"
        path = "/"
        backend = { service = "tenant-a", port = 80 }

        [[rules]]
        path = "/"
        backend = { service = "default", port = 80 }
        "#,
    );

    assert_eq!(rewrite(&set, "A.EXAMPLE.com", "/x").unwrap().1, "tenant-a");
    assert_eq!(rewrite(&set, "b.example.com", "/x").unwrap().1, "default");
}

#[test]
fn exact_rules_do_not_match_subpaths() {
    let set = compile(
        r#"
        [[rules]]
        path = "/healthz"
        path_type = "exact"
        backend = { service = "probe", port = 9000 }
        "#,
    );

    assert!(rewrite(&set, "h", "/healthz").is_some());
    assert!(rewrite(&set, "h", "/healthz/deep").is_none());
}

#[test]
fn declaration_order_beats_specificity() {
    let set = compile(
        r#"
        [[rules]]
        path = "/api"
        backend = { service = "broad", port = 80 }

        [[rules]]
        path = "/api/v2"
        backend = { service = "narrow", port = 80 }
        "#,
    );

    assert_eq!(rewrite(&set, "h", "/api/v2/users").unwrap().1, "broad");
}

#[test]
fn resolution_is_deterministic() {
    let set = compile(
        r#"
        [[rules]]
        path = "/a/(.*)"
        path_type = "regex-prefix"
        rewrite = "/b/$1"
        backend = { service = "svc", port = 80 }
        "#,
    );

    let first = rewrite(&set, "h", "/a/x/y");
    for _ in 0..100 {
        assert_eq!(rewrite(&set, "h", "/a/x/y"), first);
    }
}

#[test]
fn dollar_escape_in_template() {
    let set = compile(
        r#"
        [[rules]]
        path = "/price/(.*)"
        path_type = "regex-prefix"
        rewrite = "/$$/$1"
        backend = { service = "svc", port = 80 }
        "#,
    );

    assert_eq!(rewrite(&set, "h", "/price/42").unwrap().0, "/$/42");
}
