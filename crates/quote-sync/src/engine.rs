use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use quote_core::{Quote, QuoteError, Severity};
use quote_remote::RemoteSource;
use quote_store::LocalStore;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::notify::Notifier;
use crate::reconcile::reconcile;

/// Shared handle to the single mutable quote store.
pub type SharedStore = Arc<Mutex<LocalStore>>;

/// What a reconciliation cycle ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleReport {
    Applied {
        cycle: u64,
        added: usize,
        updated: usize,
    },
    Unchanged {
        cycle: u64,
    },
    /// A newer cycle was issued before this one could apply its result.
    Superseded {
        cycle: u64,
    },
    FetchFailed {
        cycle: u64,
        error: String,
    },
    PersistFailed {
        cycle: u64,
        error: String,
    },
}

impl CycleReport {
    pub fn cycle(&self) -> u64 {
        match self {
            Self::Applied { cycle, .. }
            | Self::Unchanged { cycle }
            | Self::Superseded { cycle }
            | Self::FetchFailed { cycle, .. }
            | Self::PersistFailed { cycle, .. } => *cycle,
        }
    }

    pub fn changed(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

impl std::fmt::Display for CycleReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Applied {
                cycle,
                added,
                updated,
            } => write!(f, "sync #{cycle}: {added} added, {updated} updated"),
            Self::Unchanged { cycle } => write!(f, "sync #{cycle}: already up to date"),
            Self::Superseded { cycle } => write!(f, "sync #{cycle}: superseded by a newer sync"),
            Self::FetchFailed { cycle, error } => {
                write!(f, "sync #{cycle}: fetch failed ({error})")
            }
            Self::PersistFailed { cycle, error } => {
                write!(f, "sync #{cycle}: could not save merged quotes ({error})")
            }
        }
    }
}

/// Runs fetch → reconcile → persist → notify against one store.
///
/// Cycles never interleave: each takes `cycle_lock` for its whole
/// duration. Every call to [`SyncEngine::run_cycle`] is issued a number
/// from a monotonic counter; a cycle whose number is no longer the latest
/// by the time its fetch returns drops its result.
pub struct SyncEngine {
    store: SharedStore,
    remote: Arc<dyn RemoteSource>,
    notifier: Arc<dyn Notifier>,
    issued: AtomicU64,
    cycle_lock: Mutex<()>,
}

impl SyncEngine {
    pub fn new(
        store: SharedStore,
        remote: Arc<dyn RemoteSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            remote,
            notifier,
            issued: AtomicU64::new(0),
            cycle_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Number of the most recently issued cycle (0 before the first).
    pub fn latest_cycle(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    fn is_stale(&self, cycle: u64) -> bool {
        self.latest_cycle() != cycle
    }

    pub async fn run_cycle(&self) -> CycleReport {
        let cycle = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let _running = self.cycle_lock.lock().await;

        if self.is_stale(cycle) {
            debug!(cycle, "skipping sync, a newer one is queued");
            return CycleReport::Superseded { cycle };
        }

        let batch = match self.remote.fetch_batch().await {
            Ok(batch) => batch,
            Err(error) => {
                warn!(cycle, %error, "sync fetch failed, will retry on next tick");
                return CycleReport::FetchFailed {
                    cycle,
                    error: error.to_string(),
                };
            }
        };

        if self.is_stale(cycle) {
            debug!(cycle, "discarding stale fetch result");
            return CycleReport::Superseded { cycle };
        }

        let mut store = self.store.lock().await;
        let outcome = reconcile(store.quotes().clone(), &batch);
        if !outcome.changed {
            debug!(cycle, fetched = batch.len(), "local quotes already up to date");
            return CycleReport::Unchanged { cycle };
        }

        if let Err(error) = store.replace(outcome.merged) {
            error!(cycle, %error, "failed to persist merged quotes");
            self.notifier
                .notify(&format!("Sync failed: {error}"), Severity::Error);
            return CycleReport::PersistFailed {
                cycle,
                error: error.to_string(),
            };
        }

        info!(
            cycle,
            added = outcome.added,
            updated = outcome.updated,
            "merged remote quotes"
        );
        self.notifier.notify(
            &format!(
                "Quotes synced with server! ({} new, {} updated)",
                outcome.added, outcome.updated
            ),
            Severity::Success,
        );
        CycleReport::Applied {
            cycle,
            added: outcome.added,
            updated: outcome.updated,
        }
    }

    /// Validate, append and persist a user quote, then push it to the remote.
    ///
    /// A failed push is reported but the local append stands.
    pub async fn submit_quote(&self, category: &str, text: &str) -> Result<Quote, QuoteError> {
        let quote = self.store.lock().await.add_quote(category, text)?;
        self.notifier
            .notify("Quote added successfully!", Severity::Success);

        match self.remote.push_quote(&quote).await {
            Ok(ack) => debug!(?ack, "quote pushed to server"),
            Err(error) => {
                warn!(%error, "quote kept locally but push failed");
                self.notifier.notify(
                    &format!("Quote saved locally but not sent to server: {error}"),
                    Severity::Warning,
                );
            }
        }
        Ok(quote)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
