//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! rule file (TOML/JSON)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks + pattern/template compilation)
//!     → RuleSet (validated, immutable)
//!     → shared via SharedRules to all readers
//!
//! On reload signal:
//!     watcher.rs detects change
//!     → loader.rs loads new rules
//!     → validation.rs validates (all errors collected)
//!     → atomic swap of the active RuleSet
//!     → in-flight resolves keep their snapshot
//! ```
//!
//! # Design Decisions
//! - Rule sets are immutable once compiled; changes require full reload
//! - Validation separates syntactic (serde) from semantic checks
//! - A reload with any invalid rule is rejected wholesale (fail-closed)

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_rules, parse_rules, ConfigError};
pub use schema::{BackendDef, PathType, RuleDef, RulesConfig};
pub use validation::{validate_and_compile, ValidationError};
pub use watcher::{spawn_reload_driver, ConfigWatcher};
