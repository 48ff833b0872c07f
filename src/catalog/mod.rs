//! In-memory catalog: the candidate source the cascade searches over.
//!
//! The catalog stands in for the host's queryable item store. It supports
//! the filtering primitives the evaluator needs: equality on the internal
//! code, exact / substring / full-text matching over named text fields,
//! price-range and subsection restriction, and counting.

use crate::model::types::{GroupId, Product, ProductGroup, ProductId};
use crate::search::query::SearchRequest;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a catalog file.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How a search term is matched against a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Whole-field equality (case-insensitive).
    Exact,
    /// Substring containment (case-insensitive).
    Substring,
    /// Token-based full-text match.
    FullText,
}

/// The full product catalog: products plus group (category) records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub groups: Vec<ProductGroup>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&ProductGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Build the candidate set for a request: visible products, optionally
    /// restricted to the request's subsection, then price-filtered.
    pub fn candidates(&self, request: &SearchRequest) -> CandidateSet<'_> {
        let section: Option<HashSet<ProductId>> = request
            .section
            .as_ref()
            .map(|ids| ids.iter().copied().collect());
        let items = self
            .products
            .iter()
            .filter(|p| p.show_in_search)
            .filter(|p| section.as_ref().is_none_or(|s| s.contains(&p.id)))
            .filter(|p| request.minimum_price.is_none_or(|min| p.price >= min))
            .filter(|p| request.maximum_price.is_none_or(|max| p.price <= max))
            .collect();
        CandidateSet { items }
    }

    /// Match group names against the term list. Group searches always cover
    /// `Title` and `MenuTitle`.
    pub fn match_groups(&self, terms: &[String], kind: MatchKind, boolean: bool) -> Vec<GroupId> {
        self.groups
            .iter()
            .filter(|g| {
                terms.iter().any(|term| {
                    field_matches(&g.title, term, kind, boolean)
                        || field_matches(&g.menu_title, term, kind, boolean)
                })
            })
            .map(|g| g.id)
            .collect()
    }

    /// Build the URL the host would redirect to for an outcome.
    pub fn redirect_url(
        &self,
        outcome: &crate::model::types::SearchOutcome,
        results_path: &str,
    ) -> String {
        use crate::model::types::SearchOutcome;
        match outcome {
            SearchOutcome::Product { id, .. } => self
                .product(*id)
                .filter(|p| !p.link.is_empty())
                .map(|p| p.link.clone())
                .unwrap_or_else(|| format!("/product/{id}")),
            SearchOutcome::Group { id, .. } => self
                .group(*id)
                .filter(|g| !g.link.is_empty())
                .map(|g| g.link.clone())
                .unwrap_or_else(|| format!("/group/{id}")),
            SearchOutcome::Results { ids } => {
                format!("{results_path}?results={}", ids.iter().join(","))
            }
        }
    }
}

/// The ordered pool of products a single evaluation searches over.
#[derive(Debug, Clone)]
pub struct CandidateSet<'a> {
    items: Vec<&'a Product>,
}

impl<'a> CandidateSet<'a> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids of every candidate, in catalog order.
    pub fn ids(&self) -> Vec<ProductId> {
        self.items.iter().map(|p| p.id).collect()
    }

    /// Candidates whose internal code equals `code`.
    pub fn by_code(&self, code: i64) -> Vec<ProductId> {
        self.items
            .iter()
            .filter(|p| p.code == code)
            .map(|p| p.id)
            .collect()
    }

    /// Candidates where any field in `fields` matches any term under `kind`.
    pub fn match_terms(
        &self,
        terms: &[String],
        fields: &[String],
        kind: MatchKind,
        boolean: bool,
    ) -> Vec<ProductId> {
        self.items
            .iter()
            .filter(|p| {
                fields.iter().any(|field| {
                    p.field(field).is_some_and(|value| {
                        terms
                            .iter()
                            .any(|term| field_matches(value, term, kind, boolean))
                    })
                })
            })
            .map(|p| p.id)
            .collect()
    }

    /// Candidates whose id appears in `ids`, preserving candidate order.
    pub fn restrict_to(&self, ids: &[ProductId]) -> Vec<ProductId> {
        let wanted: HashSet<ProductId> = ids.iter().copied().collect();
        self.items
            .iter()
            .filter(|p| wanted.contains(&p.id))
            .map(|p| p.id)
            .collect()
    }
}

/// Match one field value against one (already lowercased) search term.
fn field_matches(value: &str, term: &str, kind: MatchKind, boolean: bool) -> bool {
    if term.is_empty() {
        return false;
    }
    let value = value.to_lowercase();
    match kind {
        MatchKind::Exact => value == term,
        MatchKind::Substring => value.contains(term),
        MatchKind::FullText => fulltext_matches(&value, term, boolean),
    }
}

/// Token-based stand-in for the data store's text index. Boolean mode
/// requires every term token to occur in the field; otherwise any token
/// is enough.
fn fulltext_matches(value: &str, term: &str, boolean: bool) -> bool {
    let haystack: HashSet<&str> = tokenize(value).collect();
    let mut tokens = tokenize(term).peekable();
    if tokens.peek().is_none() {
        return false;
    }
    if boolean {
        tokens.all(|t| haystack.contains(t))
    } else {
        tokens.any(|t| haystack.contains(t))
    }
}

/// Split on non-alphanumeric boundaries. Input is already lowercased.
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, code: i64, title: &str, price: f64) -> Product {
        Product {
            id: ProductId(id),
            code,
            title: title.to_string(),
            menu_title: title.to_string(),
            price,
            show_in_search: true,
            link: String::new(),
            extra: Default::default(),
        }
    }

    fn catalog() -> Catalog {
        let mut hidden = product(4, 40, "Hidden Lamp", 5.0);
        hidden.show_in_search = false;
        Catalog {
            products: vec![
                product(1, 10, "Blue Mug", 9.95),
                product(2, 20, "Red Mug", 12.5),
                product(3, 30, "Oak Table", 250.0),
                hidden,
            ],
            groups: vec![ProductGroup {
                id: GroupId(100),
                title: "Kitchen".into(),
                menu_title: "Kitchen".into(),
                link: String::new(),
                product_ids: vec![ProductId(1), ProductId(2)],
            }],
        }
    }

    #[test]
    fn candidates_exclude_hidden_products() {
        let cat = catalog();
        let set = cat.candidates(&SearchRequest::new("mug"));
        assert_eq!(set.ids(), vec![ProductId(1), ProductId(2), ProductId(3)]);
    }

    #[test]
    fn candidates_apply_price_bounds() {
        let cat = catalog();
        let mut req = SearchRequest::new("");
        req.minimum_price = Some(10.0);
        req.maximum_price = Some(100.0);
        assert_eq!(cat.candidates(&req).ids(), vec![ProductId(2)]);
    }

    #[test]
    fn candidates_respect_section_restriction() {
        let cat = catalog();
        let mut req = SearchRequest::new("");
        req.section = Some(vec![ProductId(2), ProductId(3)]);
        assert_eq!(cat.candidates(&req).ids(), vec![ProductId(2), ProductId(3)]);
    }

    #[test]
    fn match_terms_substring_vs_exact() {
        let cat = catalog();
        let set = cat.candidates(&SearchRequest::new(""));
        let fields = vec!["Title".to_string()];
        let terms = vec!["blue mug".to_string()];
        assert_eq!(
            set.match_terms(&terms, &fields, MatchKind::Exact, true),
            vec![ProductId(1)]
        );
        let terms = vec!["mug".to_string()];
        assert!(
            set.match_terms(&terms, &fields, MatchKind::Exact, true)
                .is_empty()
        );
        assert_eq!(
            set.match_terms(&terms, &fields, MatchKind::Substring, true),
            vec![ProductId(1), ProductId(2)]
        );
    }

    #[test]
    fn fulltext_boolean_requires_all_tokens() {
        assert!(fulltext_matches("blue ceramic mug", "mug blue", true));
        assert!(!fulltext_matches("blue ceramic mug", "mug green", true));
        assert!(fulltext_matches("blue ceramic mug", "mug green", false));
    }

    #[test]
    fn restrict_preserves_candidate_order() {
        let cat = catalog();
        let set = cat.candidates(&SearchRequest::new(""));
        let restricted = set.restrict_to(&[ProductId(3), ProductId(1)]);
        assert_eq!(restricted, vec![ProductId(1), ProductId(3)]);
    }

    #[test]
    fn redirect_url_for_results_listing() {
        let cat = catalog();
        let outcome = crate::model::types::SearchOutcome::Results {
            ids: vec![ProductId(1), ProductId(2)],
        };
        assert_eq!(
            cat.redirect_url(&outcome, "searchresults"),
            "searchresults?results=1,2"
        );
    }
}
