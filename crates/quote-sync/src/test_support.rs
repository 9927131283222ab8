use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use quote_core::{Quote, QuoteError, Severity};
use quote_remote::{PushAck, RemoteSource};
use quote_store::{LocalStore, MemoryKvStore};
use tokio::sync::Semaphore;

use crate::engine::SharedStore;
use crate::notify::Notifier;

pub(crate) fn quote(category: &str, text: &str) -> Quote {
    Quote {
        category: category.to_string(),
        text: text.to_string(),
    }
}

pub(crate) fn memory_store() -> (SharedStore, Arc<MemoryKvStore>) {
    let durable = Arc::new(MemoryKvStore::new());
    let store = LocalStore::open(durable.clone(), MemoryKvStore::new());
    (Arc::new(tokio::sync::Mutex::new(store)), durable)
}

/// Remote double that replays scripted fetch results, then repeats `fallback`.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    script: Mutex<VecDeque<Result<Vec<Quote>, QuoteError>>>,
    fallback: Vec<Quote>,
    gate: Option<Semaphore>,
    delay: Duration,
    fail_push: bool,
    pub fetches: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub pushed: Mutex<Vec<Quote>>,
}

impl ScriptedSource {
    pub fn new(fallback: Vec<Quote>) -> Self {
        Self {
            fallback,
            ..Self::default()
        }
    }

    pub fn then(self, result: Result<Vec<Quote>, QuoteError>) -> Self {
        self.script.lock().unwrap().push_back(result);
        self
    }

    /// Every fetch waits for a permit from [`ScriptedSource::release`].
    pub fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    pub fn release(&self, permits: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(permits);
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteSource for ScriptedSource {
    async fn fetch_batch(&self) -> Result<Vec<Quote>, QuoteError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .expect("gate semaphore closed")
                .forget();
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let next = self.script.lock().unwrap().pop_front();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }

    async fn push_quote(&self, quote: &Quote) -> Result<PushAck, QuoteError> {
        if self.fail_push {
            return Err(QuoteError::Push("status 503".into()));
        }
        self.pushed.lock().unwrap().push(quote.clone());
        Ok(serde_json::json!({ "id": 101 }))
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub messages: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn severities(&self) -> Vec<Severity> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .map(|(_, severity)| *severity)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}
