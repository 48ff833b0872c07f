//! Search layer facade.
//!
//! This module provides the keyword-search machinery:
//!
//! - **[`query`]**: Request/query types and keyword normalization.
//! - **[`replacements`]**: Synonym replacement table for term expansion.
//! - **[`accumulator`]**: Capped, deduplicated result accumulation.
//! - **[`cascade`]**: The tiered cascade evaluator itself.

pub mod accumulator;
pub mod cascade;
pub mod query;
pub mod replacements;

pub use accumulator::ResultAccumulator;
pub use cascade::Evaluator;
pub use query::{SearchQuery, SearchRequest};
pub use replacements::{Replacement, ReplacementTable};
