//! Error types for the scheme search backends.

use scheme_core::SchemeError;

/// Errors from a scheme search backend.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("no datastore configured for category {0}")]
    NotConfigured(String),
    #[error("Google Cloud credentials not found: {0}")]
    Credentials(String),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("search backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Http(err.to_string())
        }
    }
}

impl From<CatalogError> for SchemeError {
    fn from(err: CatalogError) -> Self {
        SchemeError::Search(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::UnknownCategory("STUDENT".to_string());
        assert_eq!(err.to_string(), "unknown category: STUDENT");

        let err = CatalogError::NotConfigured("FARMER".to_string());
        assert_eq!(err.to_string(), "no datastore configured for category FARMER");

        let err = CatalogError::Status {
            status: 403,
            body: "permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "search backend returned 403: permission denied"
        );
    }

    #[test]
    fn test_catalog_error_into_scheme_error() {
        let err: SchemeError = CatalogError::Http("connection reset".to_string()).into();
        assert!(matches!(err, SchemeError::Search(_)));
        assert!(err.to_string().contains("connection reset"));
    }
}
