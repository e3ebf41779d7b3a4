use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, SchemeError};

/// Top-level configuration for the scheme assistant.
///
/// Loaded from `~/.scheme-assistant/config.toml` by default. Each section
/// corresponds to one concern; every field has a default so a partial (or
/// empty) file is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub dialogue: DialogueConfig,
    #[serde(default)]
    pub search: SearchConfig,
    /// Ordered category registry. Order is significant: it breaks
    /// classification ties.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            dialogue: DialogueConfig::default(),
            search: SearchConfig::default(),
            categories: default_categories(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject configurations the dialogue engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.dialogue.schemes_per_page == 0 {
            return Err(SchemeError::Config(
                "dialogue.schemes_per_page must be at least 1".to_string(),
            ));
        }
        if self.categories.is_empty() {
            return Err(SchemeError::Config(
                "at least one category must be configured".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.id.as_str()) {
                return Err(SchemeError::Config(format!(
                    "duplicate category id: {}",
                    category.id
                )));
            }
        }
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Recognised keys: `GCP_PROJECT_ID`, `GCP_LOCATION`,
    /// `GOOGLE_ACCESS_TOKEN`, `SCHEMES_PER_PAGE`, `USE_MOCK_SEARCH`, and
    /// `{CATEGORY_ID}_DATASTORE_ID` for every configured category.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(project) = lookup("GCP_PROJECT_ID") {
            self.search.gcp_project_id = project;
        }
        if let Some(location) = lookup("GCP_LOCATION") {
            self.search.gcp_location = location;
        }
        if let Some(token) = lookup("GOOGLE_ACCESS_TOKEN") {
            if !token.is_empty() {
                self.search.access_token = Some(token);
            }
        }
        if let Some(val) = lookup("SCHEMES_PER_PAGE") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => self.dialogue.schemes_per_page = n,
                _ => warn!(value = %val, "Ignoring invalid SCHEMES_PER_PAGE"),
            }
        }
        if let Some(val) = lookup("USE_MOCK_SEARCH") {
            self.search.use_mock_search = val.eq_ignore_ascii_case("true");
        }
        for category in &mut self.categories {
            let key = format!("{}_DATASTORE_ID", category.id.to_uppercase());
            if let Some(id) = lookup(&key) {
                category.datastore_id = id;
            }
        }
    }

    /// Category ids in configuration order.
    pub fn category_ids(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.id.as_str()).collect()
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// One "ID - description" line per category.
    pub fn category_descriptions(&self) -> String {
        self.categories
            .iter()
            .map(|c| format!("{} - {}", c.id, c.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Address the HTTP server binds to.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Dialogue engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// Schemes shown per page. Shared by every session.
    pub schemes_per_page: usize,
    /// How many schemes to request from the search backend per query.
    pub search_top_k: usize,
    /// Maximum accepted query length in characters.
    pub max_query_length: usize,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            schemes_per_page: 3,
            search_top_k: 10,
            max_query_length: 2000,
        }
    }
}

/// Search backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Serve the built-in sample catalog instead of calling Vertex AI Search.
    pub use_mock_search: bool,
    /// Google Cloud project id.
    pub gcp_project_id: String,
    /// Discovery Engine location ("global", "us", "eu", ...).
    pub gcp_location: String,
    /// OAuth access token. When absent, gcloud application-default
    /// credentials are used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Discovery Engine REST base URL.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            use_mock_search: false,
            gcp_project_id: String::new(),
            gcp_location: "global".to_string(),
            access_token: None,
            endpoint: "https://discoveryengine.googleapis.com/v1".to_string(),
            timeout_secs: 30,
        }
    }
}

/// One domain category a session can be pinned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Stable identifier, e.g. "FARMER".
    pub id: String,
    /// Display name used in clarifying questions.
    pub name: String,
    pub description: String,
    /// Lower-case keywords scored by the intent classifier.
    pub keywords: Vec<String>,
    /// Datastore id or full datastore resource path.
    #[serde(default)]
    pub datastore_id: String,
    /// Plural noun used when announcing results, e.g. "farming schemes".
    #[serde(default = "default_result_noun")]
    pub result_noun: String,
}

fn default_result_noun() -> String {
    "schemes".to_string()
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Built-in registry: farmer support first, then business support.
pub fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig {
            id: "FARMER".to_string(),
            name: "Farmer & Agriculture".to_string(),
            description: "Schemes for farmers, agriculture, crops, livestock, irrigation, and rural development".to_string(),
            keywords: keywords(&[
                "farm", "farmer", "agriculture", "crop", "seed", "tractor",
                "livestock", "cattle", "poultry", "irrigation", "harvest",
                "pesticide", "fertilizer", "land", "cultivation", "kisan",
                "dairy", "fishing", "horticulture", "plantation", "rural",
            ]),
            datastore_id: String::new(),
            result_noun: "farming schemes".to_string(),
        },
        CategoryConfig {
            id: "MSME".to_string(),
            name: "MSME & Business".to_string(),
            description: "Schemes for micro, small, and medium enterprises, startups, and businesses".to_string(),
            keywords: keywords(&[
                "business", "enterprise", "startup", "manufacturing", "company",
                "msme", "sme", "industry", "factory", "trade", "export",
                "import", "udyog", "commerce", "retail", "wholesale",
                "production", "unit", "workshop", "loan", "funding",
            ]),
            datastore_id: String::new(),
            result_noun: "business schemes".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.port, 8000);
        assert_eq!(config.dialogue.schemes_per_page, 3);
        assert_eq!(config.dialogue.search_top_k, 10);
        assert!(!config.search.use_mock_search);
        assert_eq!(config.search.gcp_location, "global");
        assert_eq!(config.category_ids(), vec!["FARMER", "MSME"]);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"
port = 9000

[dialogue]
schemes_per_page = 5

[search]
use_mock_search = true

[[categories]]
id = "STUDENT"
name = "Student & Education"
description = "Scholarships"
keywords = ["student", "scholarship"]
result_noun = "education schemes"
"#;
        let file = create_temp_config(content);
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.general.port, 9000);
        assert_eq!(config.general.host, "127.0.0.1");
        assert_eq!(config.dialogue.schemes_per_page, 5);
        assert_eq!(config.dialogue.search_top_k, 10);
        assert!(config.search.use_mock_search);
        assert_eq!(config.category_ids(), vec!["STUDENT"]);
        assert_eq!(config.categories[0].datastore_id, "");
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let file = create_temp_config("");
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.dialogue.schemes_per_page, 3);
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories[0].result_noun, "farming schemes");
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("this is {{ not valid TOML");
        assert!(AppConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_rejects_zero_page_size() {
        let file = create_temp_config("[dialogue]\nschemes_per_page = 0\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, SchemeError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_duplicate_category() {
        let mut config = AppConfig::default();
        let dup = config.categories[0].clone();
        config.categories.push(dup);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = AppConfig::default();
        config.dialogue.schemes_per_page = 4;
        config.save(&path).unwrap();

        let reloaded = AppConfig::load(&path).unwrap();
        assert_eq!(reloaded.dialogue.schemes_per_page, 4);
        assert_eq!(reloaded.categories, config.categories);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("GCP_PROJECT_ID", "my-project"),
            ("GCP_LOCATION", "us"),
            ("SCHEMES_PER_PAGE", "5"),
            ("USE_MOCK_SEARCH", "TRUE"),
            ("FARMER_DATASTORE_ID", "farmer-ds"),
            ("GOOGLE_ACCESS_TOKEN", "tok"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides_from(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.search.gcp_project_id, "my-project");
        assert_eq!(config.search.gcp_location, "us");
        assert_eq!(config.dialogue.schemes_per_page, 5);
        assert!(config.search.use_mock_search);
        assert_eq!(config.search.access_token.as_deref(), Some("tok"));
        assert_eq!(config.category("FARMER").unwrap().datastore_id, "farmer-ds");
        assert_eq!(config.category("MSME").unwrap().datastore_id, "");
    }

    #[test]
    fn test_env_override_invalid_page_size_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides_from(|k| (k == "SCHEMES_PER_PAGE").then(|| "zero".to_string()));
        assert_eq!(config.dialogue.schemes_per_page, 3);

        config.apply_overrides_from(|k| (k == "SCHEMES_PER_PAGE").then(|| "0".to_string()));
        assert_eq!(config.dialogue.schemes_per_page, 3);
    }

    #[test]
    fn test_category_lookup_and_descriptions() {
        let config = AppConfig::default();
        assert_eq!(config.category("MSME").unwrap().name, "MSME & Business");
        assert!(config.category("STUDENT").is_none());

        let desc = config.category_descriptions();
        let lines: Vec<&str> = desc.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("FARMER - "));
        assert!(lines[1].starts_with("MSME - "));
    }
}
