//! Dialogue state and response types.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use scheme_core::{Role, Scheme, Turn};

// =============================================================================
// Eligibility answers
// =============================================================================

/// Verbatim interview answers keyed `"q1"`, `"q2"`, ... in question order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EligibilityAnswers(Vec<(String, String)>);

impl EligibilityAnswers {
    /// Record the answer to question `number` (1-based), replacing any earlier
    /// answer to the same question.
    pub fn record(&mut self, number: usize, answer: &str) {
        let key = format!("q{}", number);
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = answer.to_string();
        } else {
            self.0.push((key, answer.to_string()));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

// =============================================================================
// ConversationContext
// =============================================================================

/// Per-session conversation state.
///
/// Owned by the session store; the orchestrator works on a snapshot and
/// writes it back at the end of the turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    pub session_id: String,
    /// Category the session is pinned to, once classified.
    pub category: Option<String>,
    /// Chronological, append-only.
    pub conversation_history: Vec<Turn>,
    /// Full result set of the last successful search.
    pub schemes: Vec<Scheme>,
    /// Zero-based page index into `schemes`.
    pub current_page: usize,
    /// Scheme in focus for follow-up questions.
    pub last_discussed_scheme: Option<Scheme>,
    pub eligibility_check_in_progress: bool,
    pub eligibility_scheme_id: Option<String>,
    pub eligibility_answers: EligibilityAnswers,
    /// Questions already asked; 0 means the interview has not started.
    pub current_eligibility_question: usize,
    /// Epoch seconds (UTC).
    pub created_at: i64,
}

impl ConversationContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            category: None,
            conversation_history: Vec::new(),
            schemes: Vec::new(),
            current_page: 0,
            last_discussed_scheme: None,
            eligibility_check_in_progress: false,
            eligibility_scheme_id: None,
            eligibility_answers: EligibilityAnswers::default(),
            current_eligibility_question: 0,
            created_at: Utc::now().timestamp(),
        }
    }

    pub fn add_message(&mut self, role: Role, content: &str) {
        self.conversation_history.push(Turn::new(role, content));
    }

    /// History as `role: content` lines.
    pub fn history_text(&self) -> String {
        self.conversation_history
            .iter()
            .map(|t| format!("{}: {}", t.role, t.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // -----------------------------------------------------------------
    // Pagination
    // -----------------------------------------------------------------

    /// Replace the result set and rewind to the first page.
    pub fn set_schemes(&mut self, schemes: Vec<Scheme>) {
        self.schemes = schemes;
        self.current_page = 0;
    }

    /// Offset of the first scheme on the current page.
    pub fn page_offset(&self, page_size: usize) -> usize {
        self.current_page * page_size
    }

    /// The current page; empty when the offset is past the end.
    pub fn current_page_schemes(&self, page_size: usize) -> &[Scheme] {
        let start = self.page_offset(page_size).min(self.schemes.len());
        let end = (start + page_size).min(self.schemes.len());
        &self.schemes[start..end]
    }

    pub fn has_more(&self, page_size: usize) -> bool {
        (self.current_page + 1) * page_size < self.schemes.len()
    }

    /// Move to the next page. No-op (returns false) when there is none.
    pub fn advance_page(&mut self, page_size: usize) -> bool {
        if self.has_more(page_size) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    // -----------------------------------------------------------------
    // Eligibility interview
    // -----------------------------------------------------------------

    /// Return the interview to not-started.
    pub fn reset_eligibility(&mut self) {
        self.eligibility_check_in_progress = false;
        self.current_eligibility_question = 0;
    }

    /// The scheme under interview: the last-discussed scheme, else the
    /// session scheme whose id was pinned when the interview began.
    pub fn eligibility_scheme(&self) -> Option<Scheme> {
        if let Some(ref scheme) = self.last_discussed_scheme {
            return Some(scheme.clone());
        }
        let id = self.eligibility_scheme_id.as_deref()?;
        self.schemes.iter().find(|s| s.id == id).cloned()
    }
}

// =============================================================================
// Classification and detail intents
// =============================================================================

/// Result of category classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Category(String),
    Unclear,
}

impl Classification {
    pub const UNCLEAR: &'static str = "UNCLEAR";

    pub fn as_str(&self) -> &str {
        match self {
            Classification::Category(id) => id,
            Classification::Unclear => Self::UNCLEAR,
        }
    }
}

/// What the user wants to know about a resolved scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailIntent {
    Eligibility,
    Benefits,
    Application,
    Description,
}

// =============================================================================
// DialogueResponse
// =============================================================================

/// Outcome of one dialogue turn, shaped for the transport boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueResponse {
    pub session_id: String,
    /// Rendered reply text.
    pub response: String,
    /// Schemes relevant to this turn (a page, a single scheme, or none).
    pub schemes: Vec<Scheme>,
    pub has_more: bool,
    pub category: Option<String>,
    pub total_schemes: usize,
    pub shown_schemes: usize,
}
