//! Local quote storage: the authoritative in-memory collection, its durable
//! mirror, and the session-scoped last-viewed quote.

pub mod kv;
mod store;

pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use store::{LAST_QUOTE_KEY, LocalStore, QUOTES_KEY, SELECTED_CATEGORY_KEY};
