//! Core types: products, product groups, and search outcomes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a buyable product record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a product group (category).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A buyable catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Internal numeric item code, matched by the code tier.
    pub code: i64,
    pub title: String,
    #[serde(default)]
    pub menu_title: String,
    #[serde(default)]
    pub price: f64,
    /// Hidden products never enter the candidate set.
    #[serde(default = "default_true")]
    pub show_in_search: bool,
    /// Canonical URL of the product page.
    #[serde(default)]
    pub link: String,
    /// Extra searchable text fields keyed by field name (e.g. "Description").
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Look up a searchable field by name. `Title` and `MenuTitle` are
    /// built in; anything else comes from the extra field map.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "Title" => Some(&self.title),
            "MenuTitle" => Some(&self.menu_title),
            _ => self.extra.get(name).map(String::as_str),
        }
    }
}

/// A product group (category) with its member products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductGroup {
    pub id: GroupId,
    pub title: String,
    #[serde(default)]
    pub menu_title: String,
    /// Canonical URL of the group listing page.
    #[serde(default)]
    pub link: String,
    /// Products shown on this group's initial listing.
    #[serde(default)]
    pub product_ids: Vec<ProductId>,
}

/// Which cascade stage produced a match. Most-specific tiers come first;
/// the evaluator tries them strictly in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeTier {
    /// Exact internal-code equality.
    Code,
    /// Exact field equality to a search term.
    Exact,
    /// Substring match within a field.
    Substring,
    /// Token-based full-text match.
    FullText,
    /// Exact match on a group name.
    GroupExact,
    /// Substring match on a group name.
    GroupSubstring,
    /// Full-text match on a group name.
    GroupFullText,
}

impl CascadeTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Exact => "exact",
            Self::Substring => "substring",
            Self::FullText => "full_text",
            Self::GroupExact => "group_exact",
            Self::GroupSubstring => "group_substring",
            Self::GroupFullText => "group_full_text",
        }
    }
}

impl std::fmt::Display for CascadeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one cascade evaluation: a single product to redirect to, a
/// single group to redirect to, or a bounded results listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchOutcome {
    Product { id: ProductId, tier: CascadeTier },
    Group { id: GroupId, tier: CascadeTier },
    Results { ids: Vec<ProductId> },
}

impl SearchOutcome {
    /// True for the single-redirect variants.
    pub fn is_single(&self) -> bool {
        !matches!(self, Self::Results { .. })
    }

    /// Ids of a results listing; empty for single matches.
    pub fn result_ids(&self) -> &[ProductId] {
        match self {
            Self::Results { ids } => ids,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: ProductId(1),
            code: 10,
            title: "Blue Mug".into(),
            menu_title: "Mug".into(),
            price: 9.95,
            show_in_search: true,
            link: "/product/blue-mug".into(),
            extra: BTreeMap::from([("Description".to_string(), "A mug.".to_string())]),
        }
    }

    #[test]
    fn field_lookup_covers_builtin_and_extra() {
        let p = product();
        assert_eq!(p.field("Title"), Some("Blue Mug"));
        assert_eq!(p.field("MenuTitle"), Some("Mug"));
        assert_eq!(p.field("Description"), Some("A mug."));
        assert_eq!(p.field("Missing"), None);
    }

    #[test]
    fn outcome_result_ids() {
        let single = SearchOutcome::Product {
            id: ProductId(3),
            tier: CascadeTier::Code,
        };
        assert!(single.is_single());
        assert!(single.result_ids().is_empty());

        let listing = SearchOutcome::Results {
            ids: vec![ProductId(1), ProductId(2)],
        };
        assert!(!listing.is_single());
        assert_eq!(listing.result_ids().len(), 2);
    }

    #[test]
    fn product_defaults_from_minimal_json() {
        let p: Product =
            serde_json::from_str(r#"{"id": 5, "code": 55, "title": "Chair"}"#).unwrap();
        assert!(p.show_in_search);
        assert_eq!(p.menu_title, "");
        assert!(p.extra.is_empty());
    }
}
