//! Routing subsystem: the rewrite rule engine.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path)
//!     → router.rs (linear scan, first-match-wins)
//!     → matcher.rs (host + path conditions)
//!     → template.rs (capture-group substitution)
//!     → Return: RewriteResult or NoMatch
//!
//! Rule Compilation (at load/reload):
//!     RuleDef[] (config::schema)
//!     → config::validation (compile patterns, tokenize templates)
//!     → Freeze as immutable RuleSet
//!     → shared.rs (atomic snapshot swap)
//! ```
//!
//! # Design Decisions
//! - Rules compiled at load, immutable at runtime; regex compilation
//!   never happens on the request path
//! - Deterministic: same rule set and request always resolve identically
//! - Declaration order decides overlaps (first match wins)

pub mod matcher;
pub mod router;
pub mod rule;
pub mod shared;
pub mod template;

pub use matcher::PathMatch;
pub use router::Outcome;
pub use rule::{Backend, IngressRule, RequestKey, RewriteResult, RuleSet};
pub use shared::SharedRules;
pub use template::RewriteTemplate;
