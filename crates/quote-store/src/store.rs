use anyhow::Context;
use quote_core::{CategoryFilter, Quote, QuoteCollection, QuoteError};
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::Value;
use tracing::{debug, warn};

use crate::kv::KeyValueStore;

/// Durable key holding the JSON array of quotes.
pub const QUOTES_KEY: &str = "quotes";
/// Durable key holding the selected category name (or `"all"`).
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";
/// Session key holding the last displayed quote.
pub const LAST_QUOTE_KEY: &str = "lastQuote";

/// Owner of the quote collection and its durable mirror.
///
/// Every mutation is followed by a full overwrite of the `quotes` key. The
/// in-memory copy and the stored copy can still diverge if the process dies
/// between the two; the stored value itself is never half-written.
pub struct LocalStore {
    durable: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
    quotes: QuoteCollection,
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore")
            .field("quotes", &self.quotes.len())
            .finish()
    }
}

impl LocalStore {
    /// Open the store and load the persisted collection (or the seed).
    pub fn open(
        durable: impl KeyValueStore + 'static,
        session: impl KeyValueStore + 'static,
    ) -> Self {
        let mut store = Self {
            durable: Box::new(durable),
            session: Box::new(session),
            quotes: QuoteCollection::seed(),
        };
        store.quotes = store.load();
        store
    }

    /// Read the persisted collection.
    ///
    /// Absent state yields the seed. Unreadable or corrupt state is logged
    /// and also yields the seed; this never fails. Individual entries with
    /// an empty field are dropped and the rest kept.
    pub fn load(&self) -> QuoteCollection {
        match self.read_persisted() {
            Ok(Some(quotes)) => quotes,
            Ok(None) => {
                debug!("no persisted quotes, starting from seed");
                QuoteCollection::seed()
            }
            Err(error) => {
                warn!(%error, "falling back to seed quotes");
                QuoteCollection::seed()
            }
        }
    }

    fn read_persisted(&self) -> Result<Option<QuoteCollection>, QuoteError> {
        let raw = self
            .durable
            .get(QUOTES_KEY)
            .map_err(|e| QuoteError::PersistenceRead(format!("{e:#}")))?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let stored: Vec<Quote> = serde_json::from_str(&raw)
            .map_err(|e| QuoteError::PersistenceRead(e.to_string()))?;
        let total = stored.len();
        let quotes: Vec<Quote> = stored
            .into_iter()
            .enumerate()
            .filter_map(|(index, quote)| match quote.validate() {
                Ok(()) => Some(quote),
                Err(error) => {
                    warn!(index, %error, "dropping invalid persisted quote");
                    None
                }
            })
            .collect();
        if total > 0 && quotes.is_empty() {
            return Err(QuoteError::PersistenceRead(
                "every persisted quote has an empty field".to_string(),
            ));
        }
        Ok(Some(QuoteCollection::new(quotes)))
    }

    /// Overwrite durable storage with the current collection.
    pub fn save(&self) -> Result<(), QuoteError> {
        serde_json::to_string(&self.quotes)
            .context("failed to serialize quotes")
            .and_then(|json| self.durable.set(QUOTES_KEY, &json))
            .map_err(|e| QuoteError::PersistenceWrite(format!("{e:#}")))?;
        debug!(count = self.quotes.len(), "persisted quotes");
        Ok(())
    }

    pub fn quotes(&self) -> &QuoteCollection {
        &self.quotes
    }

    /// Append without duplicate checks and persist.
    ///
    /// The caller is responsible for the quote's fields being non-empty.
    /// On a failed write the append is undone.
    pub fn append(&mut self, quote: Quote) -> Result<(), QuoteError> {
        self.quotes.push(quote);
        if let Err(error) = self.save() {
            self.quotes.pop();
            return Err(error);
        }
        Ok(())
    }

    /// Validate user input, then append and persist.
    pub fn add_quote(&mut self, category: &str, text: &str) -> Result<Quote, QuoteError> {
        let quote = Quote::new(category, text)?;
        self.append(quote.clone())?;
        Ok(quote)
    }

    /// Install a reconciled collection and persist it.
    pub fn replace(&mut self, quotes: QuoteCollection) -> Result<(), QuoteError> {
        let previous = std::mem::replace(&mut self.quotes, quotes);
        if let Err(error) = self.save() {
            self.quotes = previous;
            return Err(error);
        }
        Ok(())
    }

    /// Append every quote of a JSON array document.
    ///
    /// All-or-nothing: on any error the collection is left untouched.
    /// Returns the number of imported quotes.
    pub fn import_json(&mut self, raw: &str) -> Result<usize, QuoteError> {
        let imported = parse_import(raw)?;
        let count = imported.len();
        let previous = self.quotes.clone();
        self.quotes.extend(imported);
        if let Err(error) = self.save() {
            self.quotes = previous;
            return Err(error);
        }
        Ok(count)
    }

    /// Pretty-printed JSON of the full collection.
    pub fn export_json(&self) -> Result<String, QuoteError> {
        serde_json::to_string_pretty(&self.quotes)
            .map_err(|e| QuoteError::PersistenceWrite(e.to_string()))
    }

    /// `"all"` followed by the distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        std::iter::once(quote_core::ALL_CATEGORIES)
            .chain(self.quotes.categories())
            .map(str::to_string)
            .collect()
    }

    pub fn selected_category(&self) -> CategoryFilter {
        match self.durable.get(SELECTED_CATEGORY_KEY) {
            Ok(Some(raw)) => CategoryFilter::parse(&raw),
            Ok(None) => CategoryFilter::All,
            Err(error) => {
                warn!(error = %format!("{error:#}"), "failed to read selected category");
                CategoryFilter::All
            }
        }
    }

    pub fn set_selected_category(&self, filter: &CategoryFilter) -> Result<(), QuoteError> {
        self.durable
            .set(SELECTED_CATEGORY_KEY, filter.as_str())
            .map_err(|e| QuoteError::PersistenceWrite(format!("{e:#}")))
    }

    /// Quotes matching the persisted category selection.
    pub fn filtered(&self) -> Vec<&Quote> {
        let filter = self.selected_category();
        self.quotes.iter().filter(|q| filter.matches(q)).collect()
    }

    /// Pick a random quote from the current filter and remember it for the session.
    pub fn random_quote<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Quote> {
        let candidates = self.filtered();
        let picked = candidates.choose(rng).map(|q| (*q).clone())?;
        if let Err(error) = self.record_last_viewed(&picked) {
            warn!(%error, "failed to record last viewed quote");
        }
        Some(picked)
    }

    pub fn last_viewed(&self) -> Option<Quote> {
        let raw = match self.session.get(LAST_QUOTE_KEY) {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(error = %format!("{error:#}"), "failed to read last viewed quote");
                return None;
            }
        };
        match serde_json::from_str::<Quote>(&raw) {
            Ok(quote) => Some(quote),
            Err(error) => {
                warn!(%error, "discarding corrupt last viewed quote");
                None
            }
        }
    }

    pub fn record_last_viewed(&self, quote: &Quote) -> Result<(), QuoteError> {
        serde_json::to_string(quote)
            .context("failed to serialize quote")
            .and_then(|json| self.session.set(LAST_QUOTE_KEY, &json))
            .map_err(|e| QuoteError::PersistenceWrite(format!("{e:#}")))
    }
}

fn parse_import(raw: &str) -> Result<Vec<Quote>, QuoteError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| QuoteError::Parse(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(QuoteError::InvalidFormat(format!(
            "expected a JSON array, got {}",
            json_kind(&value)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let quote: Quote = serde_json::from_value(item).map_err(|e| {
                QuoteError::InvalidFormat(format!("element #{index} is not a quote: {e}"))
            })?;
            quote.validate().map_err(|e| {
                QuoteError::InvalidFormat(format!("element #{index} is invalid: {e}"))
            })?;
            Ok(quote)
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
