use async_trait::async_trait;
use quote_core::{Quote, QuoteError};
use serde_json::Value;

/// Acknowledgement body returned by the remote after a push.
pub type PushAck = Value;

/// Remote collection the local quotes are reconciled against.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the current bounded batch, normalized to local quotes.
    async fn fetch_batch(&self) -> Result<Vec<Quote>, QuoteError>;
    /// Submit a locally created quote. Best effort; never affects local state.
    async fn push_quote(&self, quote: &Quote) -> Result<PushAck, QuoteError>;
}

/// Source used when syncing is disabled: nothing to fetch, pushes are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSource;

#[async_trait]
impl RemoteSource for NoopSource {
    async fn fetch_batch(&self) -> Result<Vec<Quote>, QuoteError> {
        Ok(Vec::new())
    }

    async fn push_quote(&self, _quote: &Quote) -> Result<PushAck, QuoteError> {
        Ok(Value::Null)
    }
}
