//! Capped, deduplicated accumulation of result ids.

use crate::model::types::ProductId;
use std::collections::HashSet;

/// Ordered collection of result ids with a hard cap. Insertion is
/// idempotent per id and stops once the cap is reached; the cascade aborts
/// when the accumulator reports itself full.
#[derive(Debug, Clone)]
pub struct ResultAccumulator {
    ids: Vec<ProductId>,
    seen: HashSet<ProductId>,
    cap: usize,
}

impl ResultAccumulator {
    pub fn new(cap: usize) -> Self {
        Self {
            ids: Vec::new(),
            seen: HashSet::new(),
            cap,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.cap
    }

    /// Add one id. Returns true when the accumulator is full afterwards.
    pub fn push(&mut self, id: ProductId) -> bool {
        if !self.is_full() && self.seen.insert(id) {
            self.ids.push(id);
        }
        self.is_full()
    }

    /// Add ids in order, stopping at the cap. Returns true when full.
    pub fn extend<I>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = ProductId>,
    {
        for id in ids {
            if self.push(id) {
                return true;
            }
        }
        self.is_full()
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn into_ids(self) -> Vec<ProductId> {
        self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> Vec<ProductId> {
        raw.iter().copied().map(ProductId).collect()
    }

    #[test]
    fn deduplicates_preserving_first_position() {
        let mut acc = ResultAccumulator::new(10);
        acc.extend(ids(&[1, 2, 1, 3, 2]));
        assert_eq!(acc.ids(), ids(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn never_exceeds_cap() {
        let mut acc = ResultAccumulator::new(3);
        let full = acc.extend(ids(&[1, 2, 3, 4, 5]));
        assert!(full);
        assert_eq!(acc.len(), 3);
        assert_eq!(acc.ids(), ids(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn duplicate_pushes_do_not_fill() {
        let mut acc = ResultAccumulator::new(2);
        assert!(!acc.push(ProductId(1)));
        assert!(!acc.push(ProductId(1)));
        assert!(acc.push(ProductId(2)));
    }

    #[test]
    fn zero_cap_is_immediately_full() {
        let mut acc = ResultAccumulator::new(0);
        assert!(acc.is_full());
        assert!(acc.push(ProductId(1)));
        assert!(acc.is_empty());
    }
}
