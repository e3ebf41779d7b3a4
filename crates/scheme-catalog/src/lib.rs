//! Scheme search backends.
//!
//! Defines the [`SchemeSearch`] contract the dialogue engine calls, plus the
//! two implementations: a deterministic sample catalog and the Vertex AI
//! Search client. Which one runs is decided once, at construction, by
//! [`SearchBackend::from_config`].

pub mod error;
pub mod mock;
pub mod vertex;

use scheme_core::{AppConfig, Scheme};
use tracing::info;

pub use error::CatalogError;
pub use mock::MockCatalog;
pub use vertex::VertexSearchClient;

/// Fetches scheme records for a free-text query within one category.
///
/// Results are ordered by backend relevance. Calls are synchronous; a turn
/// never suspends while waiting on the backend.
pub trait SchemeSearch: Send + Sync {
    fn search(
        &self,
        category_id: &str,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<Scheme>, CatalogError>;
}

/// The search backend selected from configuration.
pub enum SearchBackend {
    Mock(MockCatalog),
    Vertex(VertexSearchClient),
}

impl SearchBackend {
    pub fn from_config(config: &AppConfig) -> Self {
        if config.search.use_mock_search {
            info!("Mock mode: using sample scheme catalog");
            SearchBackend::Mock(MockCatalog::new())
        } else {
            SearchBackend::Vertex(VertexSearchClient::new(config))
        }
    }

    /// Short backend name for health reporting.
    pub fn name(&self) -> &'static str {
        match self {
            SearchBackend::Mock(_) => "mock",
            SearchBackend::Vertex(_) => "vertex",
        }
    }
}

impl SchemeSearch for SearchBackend {
    fn search(
        &self,
        category_id: &str,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<Scheme>, CatalogError> {
        match self {
            SearchBackend::Mock(catalog) => catalog.search(category_id, query, top_k),
            SearchBackend::Vertex(client) => client.search(category_id, query, top_k),
        }
    }
}
