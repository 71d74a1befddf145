//! Rule file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_rules;
use crate::routing::rule::RuleSet;
use crate::routing::shared::SharedRules;

/// A watcher that monitors the rule file for changes.
///
/// Reload is fail-closed: a file that no longer validates is logged and
/// ignored, and the previously published rule set stays active.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RuleSet>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for validated rule sets.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RuleSet>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("rule file change detected, reloading...");
                        match load_rules(&path) {
                            Ok(new_rules) => {
                                let _ = tx.send(new_rules);
                            }
                            Err(e) => {
                                tracing::error!(
                                    "failed to reload rules: {}. Keeping current rule set.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "rule watcher started");
        Ok(watcher)
    }
}

/// Drive validated reloads into the shared handle.
///
/// Spawns a task that publishes each rule set the watcher emits. The
/// publish is a single atomic swap; in-flight resolves are unaffected.
pub fn spawn_reload_driver(
    shared: Arc<SharedRules>,
    mut updates: mpsc::UnboundedReceiver<RuleSet>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(rules) = updates.recv().await {
            shared.store(rules);
        }
    })
}
