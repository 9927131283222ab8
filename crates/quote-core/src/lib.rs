//! Domain types shared by every quote-widget crate.

pub mod error;
pub mod types;

pub use error::QuoteError;
pub use types::{
    ALL_CATEGORIES, CategoryFilter, OutputFormat, Quote, QuoteCollection, SEED_CATEGORY,
    SEED_TEXT, Severity,
};
