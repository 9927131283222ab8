use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use quote_config::RemoteConfig;
use quote_core::{Quote, QuoteError};
use serde_json::Value;
use tracing::debug;

use crate::source::{PushAck, RemoteSource};

/// JSON-over-HTTP remote: `GET endpoint` lists records, `POST endpoint` accepts a quote.
#[derive(Debug, Clone)]
pub struct HttpRemoteSource {
    endpoint: String,
    batch_limit: usize,
    category: String,
    client: reqwest::Client,
}

impl HttpRemoteSource {
    pub fn new(
        endpoint: impl Into<String>,
        batch_limit: usize,
        category: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            endpoint: endpoint.into(),
            batch_limit,
            category: category.into(),
            client,
        })
    }

    pub fn from_config(config: &RemoteConfig) -> Result<Self> {
        Self::new(
            config.endpoint.clone(),
            config.batch_limit,
            config.default_category.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn fetch_batch(&self) -> Result<Vec<Quote>, QuoteError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| QuoteError::Fetch(format!("GET {} failed: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::Fetch(format!(
                "GET {} returned status {status}",
                self.endpoint
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| QuoteError::Fetch(format!("failed to read response body: {e}")))?;
        let quotes = normalize_records(&body, self.batch_limit, &self.category)?;
        debug!(endpoint = %self.endpoint, count = quotes.len(), "fetched remote batch");
        Ok(quotes)
    }

    async fn push_quote(&self, quote: &Quote) -> Result<PushAck, QuoteError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(quote)
            .send()
            .await
            .map_err(|e| QuoteError::Push(format!("POST {} failed: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::Push(format!(
                "POST {} returned status {status}",
                self.endpoint
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| QuoteError::Push(format!("failed to read response body: {e}")))?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

/// Map the first `limit` raw records to quotes under `category`.
///
/// The record's `title` becomes the quote text; records without a usable
/// title are dropped. Any metadata the remote carries is discarded.
pub(crate) fn normalize_records(
    body: &str,
    limit: usize,
    category: &str,
) -> Result<Vec<Quote>, QuoteError> {
    let records: Vec<Value> = serde_json::from_str(body)
        .map_err(|e| QuoteError::Fetch(format!("response is not a JSON array: {e}")))?;

    let quotes = records
        .iter()
        .take(limit)
        .enumerate()
        .filter_map(|(index, record)| {
            let title = record
                .get("title")
                .and_then(Value::as_str)
                .filter(|title| !title.trim().is_empty());
            if title.is_none() {
                debug!(index, "skipping remote record without a title");
            }
            title.map(|title| Quote {
                category: category.to_string(),
                text: title.to_string(),
            })
        })
        .collect();
    Ok(quotes)
}

#[cfg(test)]
#[path = "http_source_tests.rs"]
mod tests;
