//! Follow-up phrase detection and scheme reference resolution.
//!
//! Decides whether a query is about one of the session's schemes ("tell me
//! more about scheme 2", "am I eligible for the first one?") and, if so,
//! which scheme it means and what the user wants to know about it.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use scheme_core::Scheme;

use crate::types::DetailIntent;

// =============================================================================
// Patterns
// =============================================================================

/// `scheme 2`, `option3`, `number 1` as an inquiry signal.
static NUMBERED_REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(scheme|number|option)\s*[1-9]").unwrap());

static ORDINAL_REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(first|second|third|1st|2nd|3rd)\b").unwrap());

/// Index extraction: the prefix word is optional, so the first digit 1-9
/// anywhere in the query is taken.
static INDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:scheme|number|option)?\s*([1-9])").unwrap());

/// Checked as substrings in this order; the first one present decides.
const ORDINALS: &[(&str, usize)] = &[
    ("first", 1),
    ("1st", 1),
    ("second", 2),
    ("2nd", 2),
    ("third", 3),
    ("3rd", 3),
];

const INQUIRY_PHRASES: &[&str] = &[
    "tell me more",
    "more about",
    "details",
    "information",
    "benefits",
    "eligibility",
    "how to apply",
    "apply",
    "interested",
    "want to know",
    "check eligibility",
    "am i eligible",
    "qualify",
    "scheme number",
];

const SHOW_MORE_PHRASES: &[&str] = &["show more", "more schemes", "next page"];

const ELIGIBILITY_WORDS: &[&str] = &[
    "eligibility",
    "eligible",
    "qualify",
    "can i apply",
    "am i eligible",
];
const BENEFIT_WORDS: &[&str] = &["benefit", "advantage", "what will i get", "what do i get"];
const APPLICATION_WORDS: &[&str] = &[
    "how to apply",
    "apply",
    "application",
    "process",
    "procedure",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

// =============================================================================
// Resolution result
// =============================================================================

/// How a scheme reference was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Number,
    Ordinal,
    Name,
    LastDiscussed,
    FirstListed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedScheme {
    pub scheme: Scheme,
    pub via: ReferenceKind,
}

// =============================================================================
// SchemeReferenceResolver
// =============================================================================

/// Stateless matcher over a query and the session's scheme list.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemeReferenceResolver;

impl SchemeReferenceResolver {
    pub fn new() -> Self {
        Self
    }

    /// Whether the query asks about a specific scheme or scheme details.
    pub fn is_scheme_inquiry(&self, query: &str, schemes: &[Scheme]) -> bool {
        let lowered = query.to_lowercase();

        if schemes
            .iter()
            .any(|s| !s.name.is_empty() && lowered.contains(&s.name.to_lowercase()))
        {
            return true;
        }
        if NUMBERED_REFERENCE_RE.is_match(&lowered) || ORDINAL_REFERENCE_RE.is_match(&lowered) {
            return true;
        }
        contains_any(&lowered, INQUIRY_PHRASES)
    }

    /// Pick the scheme a follow-up refers to.
    ///
    /// Numbers and ordinals index the full list (1-based). Without an
    /// explicit reference the last-discussed scheme is reused, else the
    /// first listed one. Returns `None` only for an empty list.
    pub fn resolve(
        &self,
        query: &str,
        schemes: &[Scheme],
        last_discussed: Option<&Scheme>,
    ) -> Option<ResolvedScheme> {
        if schemes.is_empty() {
            return None;
        }
        let lowered = query.to_lowercase();

        let resolved = Self::by_number(&lowered, schemes)
            .or_else(|| Self::by_ordinal(&lowered, schemes))
            .or_else(|| Self::by_name(&lowered, schemes))
            .unwrap_or_else(|| match last_discussed {
                Some(scheme) => ResolvedScheme {
                    scheme: scheme.clone(),
                    via: ReferenceKind::LastDiscussed,
                },
                None => ResolvedScheme {
                    scheme: schemes[0].clone(),
                    via: ReferenceKind::FirstListed,
                },
            });

        debug!(
            scheme_id = %resolved.scheme.id,
            via = ?resolved.via,
            "Resolved scheme reference"
        );
        Some(resolved)
    }

    fn by_number(lowered: &str, schemes: &[Scheme]) -> Option<ResolvedScheme> {
        let caps = INDEX_RE.captures(lowered)?;
        let n: usize = caps.get(1)?.as_str().parse().ok()?;
        Self::at(schemes, n, ReferenceKind::Number)
    }

    fn by_ordinal(lowered: &str, schemes: &[Scheme]) -> Option<ResolvedScheme> {
        let (_, n) = ORDINALS.iter().find(|(word, _)| lowered.contains(word))?;
        Self::at(schemes, *n, ReferenceKind::Ordinal)
    }

    fn by_name(lowered: &str, schemes: &[Scheme]) -> Option<ResolvedScheme> {
        schemes
            .iter()
            .find(|s| !s.name.is_empty() && lowered.contains(&s.name.to_lowercase()))
            .map(|s| ResolvedScheme {
                scheme: s.clone(),
                via: ReferenceKind::Name,
            })
    }

    fn at(schemes: &[Scheme], n: usize, via: ReferenceKind) -> Option<ResolvedScheme> {
        if n == 0 || n > schemes.len() {
            return None;
        }
        Some(ResolvedScheme {
            scheme: schemes[n - 1].clone(),
            via,
        })
    }

    /// What the user wants to know about the resolved scheme.
    pub fn detect_detail_intent(&self, query: &str) -> DetailIntent {
        let lowered = query.to_lowercase();
        if contains_any(&lowered, ELIGIBILITY_WORDS) {
            DetailIntent::Eligibility
        } else if contains_any(&lowered, BENEFIT_WORDS) {
            DetailIntent::Benefits
        } else if contains_any(&lowered, APPLICATION_WORDS) {
            DetailIntent::Application
        } else {
            DetailIntent::Description
        }
    }

    /// Whether the query text itself asks for the next page.
    pub fn is_show_more(&self, query: &str) -> bool {
        contains_any(&query.to_lowercase(), SHOW_MORE_PHRASES)
    }
}
