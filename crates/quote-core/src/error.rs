#[derive(thiserror::Error, Debug)]
pub enum QuoteError {
    #[error("Failed to read persisted quotes: {0}")]
    PersistenceRead(String),

    #[error("Failed to persist quotes: {0}")]
    PersistenceWrite(String),

    #[error("Failed to fetch quotes from server: {0}")]
    Fetch(String),

    #[error("Failed to push quote to server: {0}")]
    Push(String),

    #[error("Quote {field} must not be empty")]
    Validation { field: &'static str },

    #[error("Invalid JSON file format: {0}")]
    InvalidFormat(String),

    #[error("Error parsing JSON file: {0}")]
    Parse(String),
}

impl QuoteError {
    /// Errors that should interrupt the user (as opposed to being logged
    /// and retried on the next cycle).
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::InvalidFormat(_) | Self::Parse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_validation() {
        let err = QuoteError::Validation { field: "text" };
        assert_eq!(err.to_string(), "Quote text must not be empty");
    }

    #[test]
    fn test_display_fetch() {
        let err = QuoteError::Fetch("status 503".into());
        assert_eq!(
            err.to_string(),
            "Failed to fetch quotes from server: status 503"
        );
    }

    #[test]
    fn test_display_invalid_format() {
        let err = QuoteError::InvalidFormat("expected a JSON array".into());
        assert_eq!(
            err.to_string(),
            "Invalid JSON file format: expected a JSON array"
        );
    }

    #[test]
    fn test_user_facing_classification() {
        assert!(QuoteError::Validation { field: "category" }.is_user_facing());
        assert!(QuoteError::Parse("eof".into()).is_user_facing());
        assert!(QuoteError::InvalidFormat("object".into()).is_user_facing());
        assert!(!QuoteError::Fetch("timeout".into()).is_user_facing());
        assert!(!QuoteError::Push("500".into()).is_user_facing());
        assert!(!QuoteError::PersistenceRead("corrupt".into()).is_user_facing());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QuoteError>();
    }
}
