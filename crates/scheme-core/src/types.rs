use chrono::Utc;
use serde::{Deserialize, Serialize};

// =============================================================================
// Scheme
// =============================================================================

/// A government support-program record.
///
/// Every text field is free-form. Missing values are the empty string, never
/// null, so a scheme decoded from sparse JSON still round-trips all seven
/// fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scheme {
    /// Backend-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description of what the scheme provides.
    pub description: String,
    /// Eligibility criteria as written by the publishing department.
    pub eligibility: String,
    /// Benefits summary.
    pub benefits: String,
    /// How to apply.
    pub application_process: String,
    /// Landing page, if known.
    pub url: String,
}

impl Scheme {
    /// Build a scheme with the mandatory descriptive fields; the optional
    /// procedural fields start empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        eligibility: impl Into<String>,
        benefits: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            eligibility: eligibility.into(),
            benefits: benefits.into(),
            application_process: String::new(),
            url: String::new(),
        }
    }

    /// Set the application process text.
    pub fn with_application_process(mut self, process: impl Into<String>) -> Self {
        self.application_process = process.into();
        self
    }

    /// Set the landing page URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

// =============================================================================
// Conversation turns
// =============================================================================

/// Who produced a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a session's conversation history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    /// Epoch seconds (UTC) when the turn was recorded.
    pub timestamp: i64,
}

impl Turn {
    /// Create a turn stamped with the current time.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now().timestamp(),
        }
    }
}
