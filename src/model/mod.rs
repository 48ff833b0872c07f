//! Data model shared across the catalog and search layers.

pub mod types;

pub use types::{CascadeTier, GroupId, Product, ProductGroup, ProductId, SearchOutcome};
