//! Compiled rule types.
//!
//! These are the load-time products of validation: patterns already
//! compiled, templates already tokenized, hosts already lowercased.
//! Everything here is immutable after construction; reconfiguration
//! replaces the whole [`RuleSet`] rather than editing rules in place.

use crate::routing::matcher::PathMatch;
use crate::routing::template::RewriteTemplate;

/// Target service for a matched rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backend {
    pub service: String,
    pub port: u16,
}

/// One compiled ingress rule.
#[derive(Debug, Clone)]
pub struct IngressRule {
    /// Optional identifier for logs and validation messages.
    pub name: Option<String>,

    /// Exact host to match, lowercased at load. `None` matches any host.
    pub host: Option<String>,

    /// Compiled path condition.
    pub path: PathMatch,

    /// Optional rewrite template. `None` forwards the path unchanged.
    pub rewrite: Option<RewriteTemplate>,

    /// Where matching requests are sent.
    pub backend: Backend,
}

impl IngressRule {
    /// Label used in log lines: the rule's name, or its position.
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{index}"),
        }
    }
}

/// An ordered, immutable set of rules.
///
/// Order is significant: resolution is a linear first-match-wins scan.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<IngressRule>,
    generation: u64,
}

impl RuleSet {
    pub fn new(rules: Vec<IngressRule>) -> Self {
        Self {
            rules,
            generation: 0,
        }
    }

    pub fn rules(&self) -> &[IngressRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Reload counter stamped by [`SharedRules`](crate::routing::SharedRules)
    /// when this set is published.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn set_generation(&mut self, generation: u64) {
        self.generation = generation;
    }
}

/// Borrowed view of an incoming request, as supplied by the serving layer.
#[derive(Debug, Clone, Copy)]
pub struct RequestKey<'a> {
    /// Host the client asked for (any case; normalized during resolution).
    pub host: &'a str,
    /// Absolute request path, starting with `/`.
    pub path: &'a str,
}

/// Successful resolution: the matched rule, the path to forward, and the
/// backend to forward it to.
#[derive(Debug)]
pub struct RewriteResult<'a> {
    pub rule: &'a IngressRule,
    pub rewritten_path: String,
    pub backend: &'a Backend,
}
