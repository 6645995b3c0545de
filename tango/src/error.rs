/// Error types shared by the word store and the translation gateway
#[derive(Debug, thiserror::Error)]
pub enum TangoError {
    /// Caller-supplied input failed a required-field or format check
    #[error("{0}")]
    Validation(String),

    /// The translation provider was unreachable, refused the request,
    /// or answered with something we could not read
    #[error("Translation provider error: {0}")]
    Provider(String),

    /// A query expected at least one record and found none
    #[error("{0}")]
    NotFound(String),

    /// The SQLite layer failed
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Missing or invalid process configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A blocking task running a store operation did not complete
    #[error("Background task failed: {0}")]
    Task(String),
}

impl From<reqwest::Error> for TangoError {
    fn from(err: reqwest::Error) -> Self {
        TangoError::Provider(err.to_string())
    }
}

/// Result type for store and gateway operations
pub type TangoResult<T> = Result<T, TangoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = TangoError::Validation("text is required".to_string());
        assert_eq!(err.to_string(), "text is required");
    }

    #[test]
    fn test_provider_message_is_prefixed() {
        let err = TangoError::Provider("HTTP 401".to_string());
        assert_eq!(err.to_string(), "Translation provider error: HTTP 401");
    }

    #[test]
    fn test_storage_from_rusqlite() {
        let err: TangoError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, TangoError::Storage(_)));
    }
}
