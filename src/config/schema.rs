//! Configuration schema definitions.
//!
//! File-facing rule definitions, before validation and compilation.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration: an ordered list of rewrite rules.
///
/// Order is significant and preserved through compilation; overlapping
/// rules resolve by declaration order.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    pub rules: Vec<RuleDef>,
}

/// One rule as written in configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleDef {
    /// Optional identifier for logging and validation messages.
    #[serde(default)]
    pub name: Option<String>,

    /// Host to match exactly (case-insensitive). Absent = any host.
    #[serde(default)]
    pub host: Option<String>,

    /// Path pattern; interpretation depends on `path_type`.
    pub path: String,

    /// How `path` is matched.
    #[serde(default)]
    pub path_type: PathType,

    /// Rewrite template with `$1`-style capture references. Absent =
    /// forward the request path unchanged.
    #[serde(default)]
    pub rewrite: Option<String>,

    /// Backend service to forward matching requests to.
    pub backend: BackendDef,
}

/// Path matching mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PathType {
    /// Full-string equality.
    Exact,
    /// Literal prefix on segment boundaries.
    #[default]
    Prefix,
    /// Regular expression anchored at the path start.
    RegexPrefix,
}

/// Backend service reference.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendDef {
    /// Service name.
    pub service: String,

    /// Service port.
    pub port: u16,
}
