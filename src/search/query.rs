//! Search requests and keyword normalization.

use crate::model::types::ProductId;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// What the user submitted. Serializable so a host can stash it in its
/// session store and restore the form on the next visit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub keyword: String,
    #[serde(default)]
    pub minimum_price: Option<f64>,
    #[serde(default)]
    pub maximum_price: Option<f64>,
    /// When set, the search only covers this subsection of the catalog and
    /// the group-name stage is skipped.
    #[serde(default)]
    pub section: Option<Vec<ProductId>>,
}

impl SearchRequest {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Self::default()
        }
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.minimum_price = min;
        self.maximum_price = max;
        self
    }

    pub fn with_section(mut self, ids: Vec<ProductId>) -> Self {
        self.section = Some(ids);
        self
    }
}

/// The normalized form of a keyword: lowercased, whitespace-collapsed,
/// split into words, with the numeric code parse precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub words: Vec<String>,
    /// Set when the whole keyword parses as an integer.
    pub code: Option<i64>,
}

impl SearchQuery {
    pub fn parse(raw: &str) -> Self {
        let keyword = normalize_keyword(raw);
        let words = keyword
            .split(' ')
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        let code = keyword.parse::<i64>().ok();
        Self {
            keyword,
            words,
            code,
        }
    }

    /// Keywords of length <= 1 skip every keyword stage.
    pub fn is_searchable(&self) -> bool {
        self.keyword.chars().count() > 1
    }
}

/// Lowercase, NFKC-fold, and collapse runs of whitespace to single spaces.
pub fn normalize_keyword(raw: &str) -> String {
    raw.nfkc()
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_collapses_whitespace_and_case() {
        assert_eq!(normalize_keyword("  Blue\t  MUG \n"), "blue mug");
        assert_eq!(normalize_keyword(""), "");
    }

    #[test]
    fn query_splits_words() {
        let q = SearchQuery::parse(" Oak  dining Table ");
        assert_eq!(q.keyword, "oak dining table");
        assert_eq!(q.words, vec!["oak", "dining", "table"]);
        assert_eq!(q.code, None);
    }

    #[test]
    fn numeric_keyword_parses_as_code() {
        assert_eq!(SearchQuery::parse(" 1234 ").code, Some(1234));
        assert_eq!(SearchQuery::parse("12 inch").code, None);
        assert_eq!(SearchQuery::parse("12a").code, None);
    }

    #[test]
    fn short_keywords_are_not_searchable() {
        assert!(!SearchQuery::parse("").is_searchable());
        assert!(!SearchQuery::parse("a").is_searchable());
        assert!(!SearchQuery::parse("  x  ").is_searchable());
        assert!(SearchQuery::parse("ab").is_searchable());
    }

    #[test]
    fn request_round_trips_through_json() {
        let req = SearchRequest::new("mug")
            .with_price_range(Some(1.0), None)
            .with_section(vec![ProductId(7)]);
        let json = serde_json::to_string(&req).unwrap();
        let back: SearchRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }
}
