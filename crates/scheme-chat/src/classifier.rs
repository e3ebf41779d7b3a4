//! Keyword-based category classification.
//!
//! Each configured category carries a keyword list. A query scores one point
//! per keyword it contains; the category with the strictly highest score
//! wins, ties going to the earlier category in configuration order.

use scheme_core::CategoryConfig;
use tracing::debug;

use crate::types::Classification;

struct CategoryKeywords {
    id: String,
    keywords: Vec<String>,
}

/// Maps a free-text query to one configured category or UNCLEAR.
pub struct IntentClassifier {
    categories: Vec<CategoryKeywords>,
}

impl IntentClassifier {
    pub fn new(categories: &[CategoryConfig]) -> Self {
        let categories = categories
            .iter()
            .map(|c| CategoryKeywords {
                id: c.id.clone(),
                keywords: c
                    .keywords
                    .iter()
                    .map(|k| k.to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        Self { categories }
    }

    /// Classify `query`. The conversation history is accepted so callers can
    /// pass it uniformly, but scoring only looks at the query.
    pub fn classify(&self, query: &str, _history: &str) -> Classification {
        let mut best: Option<(&str, usize)> = None;
        for (id, score) in self.scores(query) {
            if score == 0 {
                continue;
            }
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((id, score)),
            }
        }

        let result = match best {
            Some((id, _)) => Classification::Category(id.to_string()),
            None => Classification::Unclear,
        };
        debug!(category = %result.as_str(), "Classified query");
        result
    }

    /// Per-category keyword scores in configuration order.
    pub fn scores(&self, query: &str) -> Vec<(&str, usize)> {
        let lowered = query.to_lowercase();
        self.categories
            .iter()
            .map(|c| {
                let score = c
                    .keywords
                    .iter()
                    .filter(|k| lowered.contains(k.as_str()))
                    .count();
                (c.id.as_str(), score)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scheme_core::config::default_categories;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new(&default_categories())
    }

    fn category(id: &str, keywords: &[&str]) -> CategoryConfig {
        CategoryConfig {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            datastore_id: String::new(),
            result_noun: "schemes".to_string(),
        }
    }

    // ---- Default registry ----

    #[test]
    fn test_farmer_query() {
        assert_eq!(
            classifier().classify("I need help with my crop insurance", ""),
            Classification::Category("FARMER".to_string())
        );
    }

    #[test]
    fn test_msme_query() {
        assert_eq!(
            classifier().classify("Looking for a loan to grow my small business", ""),
            Classification::Category("MSME".to_string())
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            classifier().classify("TRACTOR SUBSIDY", ""),
            Classification::Category("FARMER".to_string())
        );
    }

    #[test]
    fn test_no_keywords_is_unclear() {
        assert_eq!(classifier().classify("hello there", ""), Classification::Unclear);
        assert_eq!(classifier().classify("", ""), Classification::Unclear);
    }

    #[test]
    fn test_history_is_not_scored() {
        assert_eq!(
            classifier().classify("hello", "user: I am a farmer"),
            Classification::Unclear
        );
    }

    // ---- Scoring rules ----

    #[test]
    fn test_tie_goes_to_first_category() {
        let c = IntentClassifier::new(&[category("A", &["alpha"]), category("B", &["beta"])]);
        assert_eq!(
            c.classify("alpha beta", ""),
            Classification::Category("A".to_string())
        );

        let reversed = IntentClassifier::new(&[category("B", &["beta"]), category("A", &["alpha"])]);
        assert_eq!(
            reversed.classify("alpha beta", ""),
            Classification::Category("B".to_string())
        );
    }

    #[test]
    fn test_higher_score_wins_regardless_of_order() {
        let c = IntentClassifier::new(&[
            category("A", &["alpha"]),
            category("B", &["beta", "gamma"]),
        ]);
        assert_eq!(
            c.classify("alpha beta gamma", ""),
            Classification::Category("B".to_string())
        );
    }

    #[test]
    fn test_keyword_counts_once_per_query() {
        let c = IntentClassifier::new(&[
            category("A", &["alpha"]),
            category("B", &["beta", "gamma"]),
        ]);
        assert_eq!(c.scores("alpha alpha alpha beta"), vec![("A", 1), ("B", 1)]);
    }

    #[test]
    fn test_substring_matches() {
        let c = IntentClassifier::new(&[category("FARMER", &["farm"])]);
        assert_eq!(c.scores("my farmhouse"), vec![("FARMER", 1)]);
    }
}
