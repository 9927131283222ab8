use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// Category of the quote every fresh install starts with.
pub const SEED_CATEGORY: &str = "Love";
/// Text of the quote every fresh install starts with.
pub const SEED_TEXT: &str = "To love is to be self";
/// Literal stored for the "no filter" selection.
pub const ALL_CATEGORIES: &str = "all";

/// A single `{category, text}` record.
///
/// `text` is the merge identity: two quotes with the same text are the
/// same quote as far as reconciliation is concerned.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub category: String,
    pub text: String,
}

impl Quote {
    /// Build a quote from user input, trimming both fields.
    pub fn new(category: &str, text: &str) -> Result<Self, QuoteError> {
        let category = category.trim();
        let text = text.trim();
        if text.is_empty() {
            return Err(QuoteError::Validation { field: "text" });
        }
        if category.is_empty() {
            return Err(QuoteError::Validation { field: "category" });
        }
        Ok(Self {
            category: category.to_string(),
            text: text.to_string(),
        })
    }

    /// Check the collection invariant without altering the fields.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.text.trim().is_empty() {
            return Err(QuoteError::Validation { field: "text" });
        }
        if self.category.trim().is_empty() {
            return Err(QuoteError::Validation { field: "category" });
        }
        Ok(())
    }

    pub fn seed() -> Self {
        Self {
            category: SEED_CATEGORY.to_string(),
            text: SEED_TEXT.to_string(),
        }
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.text, self.category)
    }
}

/// Ordered quote collection, serialized as a bare JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteCollection(Vec<Quote>);

impl QuoteCollection {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self(quotes)
    }

    /// The single-quote collection used when nothing has been persisted.
    pub fn seed() -> Self {
        Self(vec![Quote::seed()])
    }

    /// Append without any duplicate check.
    pub fn push(&mut self, quote: Quote) {
        self.0.push(quote);
    }

    pub fn pop(&mut self) -> Option<Quote> {
        self.0.pop()
    }

    pub fn extend(&mut self, quotes: impl IntoIterator<Item = Quote>) {
        self.0.extend(quotes);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.0.iter()
    }

    /// Index of the first quote whose text matches exactly.
    pub fn position_by_text(&self, text: &str) -> Option<usize> {
        self.0.iter().position(|quote| quote.text == text)
    }

    pub fn get(&self, index: usize) -> Option<&Quote> {
        self.0.get(index)
    }

    /// Overwrite the quote at `index`. Out-of-range indices are ignored.
    pub fn replace_at(&mut self, index: usize, quote: Quote) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = quote;
        }
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for quote in &self.0 {
            if !seen.contains(&quote.category.as_str()) {
                seen.push(quote.category.as_str());
            }
        }
        seen
    }

    pub fn filtered<'a>(&'a self, filter: &'a CategoryFilter) -> impl Iterator<Item = &'a Quote> {
        self.0.iter().filter(move |quote| filter.matches(quote))
    }
}

impl From<Vec<Quote>> for QuoteCollection {
    fn from(quotes: Vec<Quote>) -> Self {
        Self(quotes)
    }
}

impl<'a> IntoIterator for &'a QuoteCollection {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Category selection used to narrow what gets displayed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parse the stored representation; `"all"` (or blank) selects everything.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(name) => name,
        }
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            Self::All => true,
            Self::Category(name) => quote.category == *name,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How loudly a notification should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format for CLI listings
#[derive(Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(category: &str, text: &str) -> Quote {
        Quote {
            category: category.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_new_trims_fields() {
        let q = Quote::new("  Wisdom ", "\tKnow thyself\n").unwrap();
        assert_eq!(q.category, "Wisdom");
        assert_eq!(q.text, "Know thyself");
    }

    #[test]
    fn test_new_rejects_blank_text() {
        let err = Quote::new("Wisdom", "   ").unwrap_err();
        assert!(matches!(err, QuoteError::Validation { field: "text" }));
    }

    #[test]
    fn test_new_rejects_blank_category() {
        let err = Quote::new("", "Know thyself").unwrap_err();
        assert!(matches!(err, QuoteError::Validation { field: "category" }));
    }

    #[test]
    fn test_seed_collection() {
        let seed = QuoteCollection::seed();
        assert_eq!(seed.len(), 1);
        assert_eq!(seed.get(0), Some(&quote("Love", "To love is to be self")));
    }

    #[test]
    fn test_collection_serializes_as_array() {
        let collection = QuoteCollection::new(vec![quote("Love", "A")]);
        let json = serde_json::to_string(&collection).unwrap();
        assert_eq!(json, r#"[{"category":"Love","text":"A"}]"#);
    }

    #[test]
    fn test_categories_first_seen_order() {
        let collection = QuoteCollection::new(vec![
            quote("Love", "A"),
            quote("General", "B"),
            quote("Love", "C"),
            quote("Humor", "D"),
        ]);
        assert_eq!(collection.categories(), vec!["Love", "General", "Humor"]);
    }

    #[test]
    fn test_position_by_text_is_case_sensitive() {
        let collection = QuoteCollection::new(vec![quote("Love", "Abc")]);
        assert_eq!(collection.position_by_text("Abc"), Some(0));
        assert_eq!(collection.position_by_text("abc"), None);
    }

    #[test]
    fn test_filter_parse_and_match() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        let love = CategoryFilter::parse("Love");
        assert_eq!(love, CategoryFilter::Category("Love".into()));
        assert!(love.matches(&quote("Love", "A")));
        assert!(!love.matches(&quote("General", "A")));
        assert!(CategoryFilter::All.matches(&quote("General", "A")));
        assert_eq!(love.to_string(), "Love");
        assert_eq!(CategoryFilter::All.to_string(), "all");
    }

    #[test]
    fn test_display_quote() {
        assert_eq!(quote("Love", "A").to_string(), "A - Love");
    }
}
