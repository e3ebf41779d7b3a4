//! Vertex AI Search (Discovery Engine) REST client.
//!
//! Each category maps to one datastore. Documents are normalized into
//! [`Scheme`] values here so nothing downstream depends on the datastore's
//! record shape.

use std::collections::HashMap;
use std::process::Command;
use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::Client;
use scheme_core::config::{AppConfig, SearchConfig};
use scheme_core::Scheme;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::error::CatalogError;
use crate::SchemeSearch;

const UNTITLED: &str = "Untitled Scheme";
const NO_DESCRIPTION: &str = "No description available";
const DEFAULT_ELIGIBILITY: &str = "Contact office for details";

/// Blocking Discovery Engine search client.
///
/// The HTTP client is built on first use so that constructing the backend
/// inside an async runtime is safe.
pub struct VertexSearchClient {
    config: SearchConfig,
    datastores: HashMap<String, String>,
    client: OnceLock<Client>,
}

impl VertexSearchClient {
    /// Build a client from the search settings and category registry.
    pub fn new(config: &AppConfig) -> Self {
        let datastores = config
            .categories
            .iter()
            .map(|c| {
                (
                    c.id.clone(),
                    datastore_path(&config.search, &c.datastore_id),
                )
            })
            .collect();
        info!(
            project = %config.search.gcp_project_id,
            location = %config.search.gcp_location,
            "Vertex AI Search client configured"
        );
        Self {
            config: config.search.clone(),
            datastores,
            client: OnceLock::new(),
        }
    }

    /// Full serving-config resource for a category.
    pub fn serving_config(&self, category_id: &str) -> Result<String, CatalogError> {
        let path = self
            .datastores
            .get(category_id)
            .ok_or_else(|| CatalogError::UnknownCategory(category_id.to_string()))?;
        if path.is_empty() {
            return Err(CatalogError::NotConfigured(category_id.to_string()));
        }
        Ok(format!("{}/servingConfigs/default_config", path))
    }

    fn http(&self) -> Result<&Client, CatalogError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()?;
        // A concurrent first call may win the race; either client is fine.
        let _ = self.client.set(client);
        self.client
            .get()
            .ok_or_else(|| CatalogError::Http("client initialisation failed".to_string()))
    }

    fn access_token(&self) -> Result<String, CatalogError> {
        if let Some(token) = self.config.access_token.as_ref().filter(|t| !t.is_empty()) {
            return Ok(token.clone());
        }
        let output = Command::new("gcloud")
            .args(["auth", "application-default", "print-access-token"])
            .output()
            .map_err(|e| {
                CatalogError::Credentials(format!(
                    "set GOOGLE_ACCESS_TOKEN or run `gcloud auth application-default login` ({})",
                    e
                ))
            })?;
        if !output.status.success() {
            return Err(CatalogError::Credentials(
                "run `gcloud auth application-default login`".to_string(),
            ));
        }
        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(CatalogError::Credentials("gcloud returned an empty token".to_string()));
        }
        Ok(token)
    }
}

impl SchemeSearch for VertexSearchClient {
    fn search(
        &self,
        category_id: &str,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<Scheme>, CatalogError> {
        let serving_config = self.serving_config(category_id)?;
        let url = format!("{}/{}:search", self.config.endpoint.trim_end_matches('/'), serving_config);
        let token = self.access_token()?;

        debug!(category = %category_id, top_k, "Vertex search request");
        let response = self
            .http()?
            .post(&url)
            .bearer_auth(token)
            .json(&search_request(query, top_k))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json()?;
        let schemes = parse_search_response(&body);
        info!(category = %category_id, count = schemes.len(), "Retrieved schemes");
        Ok(schemes)
    }
}

/// Expand a bare datastore id into a full resource path.
pub fn datastore_path(search: &SearchConfig, datastore_id: &str) -> String {
    if datastore_id.is_empty() || datastore_id.starts_with("projects/") {
        return datastore_id.to_string();
    }
    format!(
        "projects/{}/locations/{}/collections/default_collection/dataStores/{}",
        search.gcp_project_id, search.gcp_location, datastore_id
    )
}

/// JSON body for a `:search` call.
pub fn search_request(query: &str, top_k: usize) -> Value {
    json!({
        "query": query,
        "pageSize": top_k,
        "queryExpansionSpec": { "condition": "AUTO" },
        "spellCorrectionSpec": { "mode": "AUTO" },
    })
}

/// Normalize every result document, skipping metadata documents.
pub fn parse_search_response(body: &Value) -> Vec<Scheme> {
    body.get("results")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .filter_map(|r| r.get("document"))
                .filter_map(normalize_document)
                .collect()
        })
        .unwrap_or_default()
}

/// Convert one Discovery Engine document into a [`Scheme`].
///
/// Returns `None` for index/metadata documents that carry no scheme data.
pub fn normalize_document(doc: &Value) -> Option<Scheme> {
    let id = text(doc, "id");
    let empty = Value::Null;
    let data = doc
        .get("structData")
        .and_then(|s| s.get("data"))
        .unwrap_or(&empty);

    let name = text_or(data, "name", UNTITLED);
    let description = text_or(data, "description", NO_DESCRIPTION);
    if name == UNTITLED || description == NO_DESCRIPTION {
        warn!(doc_id = %id, "Skipping metadata document");
        return None;
    }

    let mut benefits = text(data, "benefitSummary");
    if benefits.is_empty() {
        if let Some(benefit) = data.get("benefit").filter(|b| b.is_object()) {
            benefits = ["description", "summary", "details"]
                .iter()
                .map(|k| text(benefit, k))
                .find(|v| !v.is_empty())
                .unwrap_or_default();
        }
    }

    let mut application_process = text(data, "process");
    if application_process.is_empty() {
        let dept = text(data, "departmentAgency");
        if !dept.is_empty() {
            application_process = format!("Contact {}", dept);
        }
    }

    let guid = text(data, "guid");
    let url = if guid.is_empty() {
        String::new()
    } else {
        format!("https://schemes.gov.in/scheme/{}", guid)
    };

    Some(
        Scheme::new(
            id,
            name,
            description,
            text_or(data, "eligibility", DEFAULT_ELIGIBILITY),
            benefits,
        )
        .with_application_process(application_process)
        .with_url(url),
    )
}

fn text(obj: &Value, key: &str) -> String {
    match obj.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(false)) => String::new(),
        Some(other) => other.to_string(),
    }
}

fn text_or(obj: &Value, key: &str, default: &str) -> String {
    let value = text(obj, key);
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(data: Value) -> Value {
        json!({ "id": "doc-1", "structData": { "data": data } })
    }

    // ---- Datastore paths ----

    #[test]
    fn test_datastore_path_expands_bare_id() {
        let mut search = SearchConfig::default();
        search.gcp_project_id = "proj".to_string();
        assert_eq!(
            datastore_path(&search, "farmer-ds"),
            "projects/proj/locations/global/collections/default_collection/dataStores/farmer-ds"
        );
    }

    #[test]
    fn test_datastore_path_keeps_full_path() {
        let search = SearchConfig::default();
        let full = "projects/p/locations/us/collections/default_collection/dataStores/x";
        assert_eq!(datastore_path(&search, full), full);
        assert_eq!(datastore_path(&search, ""), "");
    }

    #[test]
    fn test_serving_config_errors() {
        let client = VertexSearchClient::new(&AppConfig::default());
        assert!(matches!(
            client.serving_config("FARMER"),
            Err(CatalogError::NotConfigured(_))
        ));
        assert!(matches!(
            client.serving_config("STUDENT"),
            Err(CatalogError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_search_without_datastore_fails_before_network() {
        let client = VertexSearchClient::new(&AppConfig::default());
        let err = client.search("FARMER", "seeds", 10).unwrap_err();
        assert!(matches!(err, CatalogError::NotConfigured(_)));
    }

    #[test]
    fn test_serving_config_suffix() {
        let mut config = AppConfig::default();
        config.categories[1].datastore_id = "msme-ds".to_string();
        let client = VertexSearchClient::new(&config);
        assert!(client
            .serving_config("MSME")
            .unwrap()
            .ends_with("dataStores/msme-ds/servingConfigs/default_config"));
    }

    #[test]
    fn test_search_request_shape() {
        let body = search_request("tractor subsidy", 5);
        assert_eq!(body["query"], "tractor subsidy");
        assert_eq!(body["pageSize"], 5);
        assert_eq!(body["queryExpansionSpec"]["condition"], "AUTO");
        assert_eq!(body["spellCorrectionSpec"]["mode"], "AUTO");
    }

    // ---- Normalization ----

    #[test]
    fn test_normalize_full_document() {
        let scheme = normalize_document(&doc(json!({
            "name": "PM-KISAN",
            "description": "Income support",
            "eligibility": "Landholding farmers",
            "benefitSummary": "₹6000 per year",
            "process": "Register online",
            "guid": "abc123",
        })))
        .unwrap();
        assert_eq!(scheme.id, "doc-1");
        assert_eq!(scheme.name, "PM-KISAN");
        assert_eq!(scheme.benefits, "₹6000 per year");
        assert_eq!(scheme.application_process, "Register online");
        assert_eq!(scheme.url, "https://schemes.gov.in/scheme/abc123");
    }

    #[test]
    fn test_normalize_benefit_object_fallback() {
        let scheme = normalize_document(&doc(json!({
            "name": "KCC",
            "description": "Credit",
            "benefit": { "summary": "Low interest" },
        })))
        .unwrap();
        assert_eq!(scheme.benefits, "Low interest");
    }

    #[test]
    fn test_normalize_department_fallback_and_defaults() {
        let scheme = normalize_document(&doc(json!({
            "name": "Soil Health Card",
            "description": "Soil testing",
            "departmentAgency": "Department of Agriculture",
        })))
        .unwrap();
        assert_eq!(scheme.application_process, "Contact Department of Agriculture");
        assert_eq!(scheme.eligibility, DEFAULT_ELIGIBILITY);
        assert_eq!(scheme.url, "");
        assert_eq!(scheme.benefits, "");
    }

    #[test]
    fn test_normalize_skips_metadata_documents() {
        assert!(normalize_document(&doc(json!({ "description": "x" }))).is_none());
        assert!(normalize_document(&doc(json!({ "name": "Real" }))).is_none());
        assert!(normalize_document(&json!({ "id": "index" })).is_none());
    }

    #[test]
    fn test_normalize_stringifies_non_string_values() {
        let scheme = normalize_document(&doc(json!({
            "name": "Scheme",
            "description": "Desc",
            "guid": 42,
        })))
        .unwrap();
        assert_eq!(scheme.url, "https://schemes.gov.in/scheme/42");
    }

    #[test]
    fn test_parse_search_response_filters_and_preserves_order() {
        let body = json!({
            "results": [
                { "document": { "id": "a", "structData": { "data": { "name": "A", "description": "first" } } } },
                { "document": { "id": "meta", "structData": {} } },
                { "document": { "id": "b", "structData": { "data": { "name": "B", "description": "second" } } } },
            ]
        });
        let schemes = parse_search_response(&body);
        let ids: Vec<&str> = schemes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_search_response_without_results() {
        assert!(parse_search_response(&json!({})).is_empty());
    }
}
