//! Atomically swappable rule set handle.
//!
//! # Responsibilities
//! - Publish a new rule set generation in one atomic store
//! - Hand out immutable snapshots to concurrent readers
//!
//! # Design Decisions
//! - `arc_swap::ArcSwap` gives wait-free reads; resolution never locks
//! - One writer (the reload path), many readers; a reader holds whichever
//!   snapshot it loaded for the duration of its resolve call
//! - Generations are stamped here, at publish time, so every published
//!   set carries a strictly increasing counter for log correlation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::routing::rule::RuleSet;

/// Shared handle to the active [`RuleSet`].
pub struct SharedRules {
    current: ArcSwap<RuleSet>,
    generation: AtomicU64,
}

impl SharedRules {
    /// Publish an initial rule set as generation 1.
    pub fn new(initial: RuleSet) -> Self {
        let shared = Self {
            current: ArcSwap::from_pointee(RuleSet::default()),
            generation: AtomicU64::new(0),
        };
        shared.store(initial);
        shared
    }

    /// Snapshot of the currently active rule set.
    ///
    /// The returned `Arc` stays valid and unchanged even if a reload
    /// publishes a newer generation while the caller is still using it.
    pub fn load(&self) -> Arc<RuleSet> {
        self.current.load_full()
    }

    /// Atomically replace the active rule set.
    ///
    /// In-flight resolves keep the snapshot they already loaded; new
    /// loads observe the new set in full. Never publishes a partially
    /// updated set.
    pub fn store(&self, mut rules: RuleSet) {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        rules.set_generation(generation);
        let count = rules.len();
        self.current.store(Arc::new(rules));
        tracing::info!(generation, rules = count, "rule set published");
    }
}

impl std::fmt::Debug for SharedRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRules")
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .finish()
    }
}
