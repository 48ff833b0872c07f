//! Synonym replacement table for query expansion.
//!
//! Each entry maps one or more canonical search terms (a comma-separated
//! list) to a replacement term. During the phrase stage, every word of the
//! query is looked up and the matching replacements are appended to the
//! term list, so a word is tried both as written and as each replacement.

use crate::search::query::{SearchQuery, normalize_keyword};
use serde::{Deserialize, Serialize};

/// One configured replacement rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// Comma-separated list of canonical terms this rule responds to.
    pub search: String,
    /// The term to search instead.
    pub replace: String,
}

impl Replacement {
    fn matches(&self, word: &str) -> bool {
        self.search
            .split(',')
            .any(|term| term.trim().to_lowercase() == word)
    }
}

/// The full replacement table, looked up per word of the query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplacementTable {
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

impl ReplacementTable {
    pub fn new(replacements: Vec<Replacement>) -> Self {
        Self { replacements }
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Expand a query into its term list: the full normalized phrase first,
    /// then each word's replacements, trimmed and deduplicated in discovery
    /// order.
    pub fn expand(&self, query: &SearchQuery) -> Vec<String> {
        let mut terms = vec![query.keyword.clone()];
        for word in &query.words {
            for rule in self.replacements.iter().filter(|r| r.matches(word)) {
                let term = normalize_keyword(&rule.replace);
                if !term.is_empty() && !terms.contains(&term) {
                    terms.push(term);
                }
            }
        }
        terms
    }
}
