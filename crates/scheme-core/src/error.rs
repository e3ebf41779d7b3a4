use thiserror::Error;

/// Top-level error type for the scheme assistant.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for SchemeError` so that `?` works across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for SchemeError {
    fn from(err: toml::de::Error) -> Self {
        SchemeError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SchemeError {
    fn from(err: toml::ser::Error) -> Self {
        SchemeError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SchemeError {
    fn from(err: serde_json::Error) -> Self {
        SchemeError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for scheme assistant operations.
pub type Result<T> = std::result::Result<T, SchemeError>;
