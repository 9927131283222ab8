//! Local/remote reconciliation: merge policy, cycle engine, and scheduler.

pub mod engine;
pub mod notify;
pub mod reconcile;
pub mod scheduler;

#[cfg(test)]
mod test_support;

pub use engine::{CycleReport, SharedStore, SyncEngine};
pub use notify::{Notifier, TracingNotifier};
pub use reconcile::{ReconcileOutcome, reconcile};
pub use scheduler::{SchedulerError, SchedulerHandle, SyncScheduler};
