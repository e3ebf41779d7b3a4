//! Error types for the dialogue engine.

/// Errors from the dialogue engine.
///
/// Backend search failures never surface here: the orchestrator turns them
/// into a degraded response instead.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("query cannot be empty")]
    EmptyQuery,
    #[error("query exceeds maximum length of {0} characters")]
    QueryTooLong(usize),
    #[error("session not found: {0}")]
    SessionNotFound(String),
    #[error("session state error: {0}")]
    State(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::EmptyQuery.to_string(), "query cannot be empty");
        assert_eq!(
            ChatError::QueryTooLong(2000).to_string(),
            "query exceeds maximum length of 2000 characters"
        );
        assert_eq!(
            ChatError::SessionNotFound("abc".to_string()).to_string(),
            "session not found: abc"
        );
        assert_eq!(
            ChatError::State("lock poisoned".to_string()).to_string(),
            "session state error: lock poisoned"
        );
    }
}
