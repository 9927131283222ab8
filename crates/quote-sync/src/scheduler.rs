//! Periodic and on-demand reconciliation.
//!
//! A single background task owns the ticker and runs every cycle itself,
//! so scheduled and manual syncs are naturally serialized.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::engine::{CycleReport, SyncEngine};

const TRIGGER_QUEUE_DEPTH: usize = 8;

#[derive(thiserror::Error, Debug)]
pub enum SchedulerError {
    #[error("sync scheduler is not running")]
    Stopped,
}

pub struct SyncScheduler {
    engine: Arc<SyncEngine>,
    interval: Duration,
}

impl SyncScheduler {
    pub fn new(engine: Arc<SyncEngine>, interval: Duration) -> Self {
        Self { engine, interval }
    }

    /// Start the background loop. The first scheduled cycle runs immediately.
    pub fn spawn(self) -> SchedulerHandle {
        let (trigger_tx, trigger_rx) = mpsc::channel(TRIGGER_QUEUE_DEPTH);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_sync_loop(
            self.engine,
            self.interval,
            trigger_rx,
            cancel.clone(),
        ));
        SchedulerHandle {
            trigger_tx,
            cancel,
            task,
        }
    }
}

pub struct SchedulerHandle {
    trigger_tx: mpsc::Sender<oneshot::Sender<CycleReport>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Run a cycle now and wait for its report.
    pub async fn sync_now(&self) -> Result<CycleReport, SchedulerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.trigger_tx
            .send(reply_tx)
            .await
            .map_err(|_| SchedulerError::Stopped)?;
        reply_rx.await.map_err(|_| SchedulerError::Stopped)
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the loop after the in-flight cycle (if any) completes.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(error) = self.task.await {
            warn!(%error, "sync scheduler task ended abnormally");
        }
    }
}

async fn run_sync_loop(
    engine: Arc<SyncEngine>,
    interval: Duration,
    mut trigger_rx: mpsc::Receiver<oneshot::Sender<CycleReport>>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            maybe_reply = trigger_rx.recv() => {
                let Some(reply) = maybe_reply else {
                    break;
                };
                let report = engine.run_cycle().await;
                debug!(%report, "on-demand sync finished");
                // Requester may have given up waiting.
                let _ = reply.send(report);
                ticker.reset();
            }
            _ = ticker.tick() => {
                let report = engine.run_cycle().await;
                debug!(%report, "scheduled sync finished");
            }
        }
    }
    debug!("sync scheduler stopped");
}
