//! HTTP path-rewriting ingress rule engine.
//!
//! Given an ordered set of (host, path pattern, rewrite template, backend)
//! rules and an incoming request (host, path), selects the first matching
//! rule and computes the rewritten path and target backend — the rule
//! engine behind nginx-style `rewrite-target` ingress annotations.
//!
//! # Architecture Overview
//!
//! ```text
//!   rule file (TOML/JSON)                    per-request
//!   ─────────────────────┐                 ┌──────────────────────────
//!                        ▼                 ▼
//!   ┌──────────┐   ┌────────────┐   ┌─────────────┐   Match(rewritten
//!   │ config:: │──▶│ config::   │──▶│ routing::   │──▶ path + backend)
//!   │ loader   │   │ validation │   │ RuleSet::   │   or NoMatch
//!   └──────────┘   └─────┬──────┘   │ resolve     │
//!         ▲              ▼          └──────▲──────┘
//!   ┌──────────┐   ┌────────────┐          │ load() snapshot
//!   │ config:: │──▶│ routing::  │──────────┘
//!   │ watcher  │   │ SharedRules│  atomic swap on reload
//!   └──────────┘   └────────────┘
//! ```
//!
//! Resolution is a pure, lock-free function over an immutable snapshot;
//! all regex compilation and template parsing happens at load time.
//!
//! # Example
//!
//! ```
//! use ingress_rewrite::config::{validate_and_compile, RulesConfig};
//! use ingress_rewrite::routing::{Outcome, RequestKey};
//!
//! let config: RulesConfig = toml::from_str(r#"
//!     [[rules]]
//!     path = "/pay"
//!     rewrite = "/"
//!     backend = { service = "payments", port = 8080 }
//! "#).unwrap();
//!
//! let rules = validate_and_compile(&config).unwrap();
//! match rules.resolve(RequestKey { host: "shop.example.com", path: "/pay/checkout" }) {
//!     Outcome::Match(result) => {
//!         assert_eq!(result.rewritten_path, "/checkout");
//!         assert_eq!(result.backend.service, "payments");
//!     }
//!     Outcome::NoMatch => unreachable!(),
//! }
//! ```

pub mod config;
pub mod routing;

pub use config::{load_rules, ConfigError, ConfigWatcher, RulesConfig, ValidationError};
pub use routing::{Backend, IngressRule, Outcome, RequestKey, RewriteResult, RuleSet, SharedRules};
