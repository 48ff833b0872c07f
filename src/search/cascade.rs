//! The tiered search cascade.
//!
//! The evaluator widens the search stage by stage until something useful
//! turns up: exact code match, then phrase matching over product fields
//! (exact, substring, full-text), then the same tiers over group names,
//! and finally the plain candidate listing. A stage with exactly one hit
//! short-circuits into a single-match outcome; a stage with several hits
//! feeds the accumulator and the cascade carries on until the accumulator
//! fills or the tiers run out.

use crate::catalog::{Catalog, CandidateSet, MatchKind};
use crate::config::AppConfig;
use crate::history::{HistorySink, TracingHistory};
use crate::model::types::{CascadeTier, ProductId, SearchOutcome};
use crate::search::accumulator::ResultAccumulator;
use crate::search::query::{SearchQuery, SearchRequest};
use crate::search::replacements::ReplacementTable;
use tracing::{debug, info};

static DEFAULT_HISTORY: TracingHistory = TracingHistory;

/// Product-field tiers, most specific first.
const PRODUCT_TIERS: [(MatchKind, CascadeTier); 3] = [
    (MatchKind::Exact, CascadeTier::Exact),
    (MatchKind::Substring, CascadeTier::Substring),
    (MatchKind::FullText, CascadeTier::FullText),
];

/// Group-name tiers, most specific first.
const GROUP_TIERS: [(MatchKind, CascadeTier); 3] = [
    (MatchKind::Exact, CascadeTier::GroupExact),
    (MatchKind::Substring, CascadeTier::GroupSubstring),
    (MatchKind::FullText, CascadeTier::GroupFullText),
];

/// Runs the cascade over one catalog. Stateless across evaluations; the
/// accumulator lives inside a single [`Evaluator::evaluate`] call.
pub struct Evaluator<'a> {
    catalog: &'a Catalog,
    config: &'a AppConfig,
    table: ReplacementTable,
    history: &'a dyn HistorySink,
}

impl<'a> Evaluator<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a AppConfig) -> Self {
        Self {
            catalog,
            config,
            table: config.replacement_table(),
            history: &DEFAULT_HISTORY,
        }
    }

    /// Swap in a different history sink (tests, or a host-provided store).
    pub fn with_history(mut self, history: &'a dyn HistorySink) -> Self {
        self.history = history;
        self
    }

    /// Evaluate one search request.
    pub fn evaluate(&self, request: &SearchRequest) -> SearchOutcome {
        let candidates = self.catalog.candidates(request);
        let query = SearchQuery::parse(&request.keyword);
        let mut acc = ResultAccumulator::new(self.config.search.maximum_results);

        if query.is_searchable() && !candidates.is_empty() {
            self.history.record(&query.keyword);
            if let Some(outcome) = self.keyword_stages(&query, request, &candidates, &mut acc) {
                info!(keyword = %query.keyword, outcome = ?outcome, "search single match");
                return outcome;
            }
        }

        // Nothing matched (or the keyword was too short to search): fall
        // back to the filtered base listing, capped.
        if acc.is_empty() {
            acc.extend(candidates.ids());
        }
        info!(
            keyword = %query.keyword,
            results = acc.len(),
            "search results listing"
        );
        SearchOutcome::Results { ids: acc.into_ids() }
    }

    /// Stages 1-3. Returns a single-match outcome, or None once the tiers
    /// are exhausted or the accumulator fills.
    fn keyword_stages(
        &self,
        query: &SearchQuery,
        request: &SearchRequest,
        candidates: &CandidateSet<'_>,
        acc: &mut ResultAccumulator,
    ) -> Option<SearchOutcome> {
        // 1) Exact search by code.
        if let Some(code) = query.code {
            let hits = candidates.by_code(code);
            debug!(tier = CascadeTier::Code.label(), hits = hits.len(), "cascade stage");
            match hits.as_slice() {
                [only] => {
                    return Some(SearchOutcome::Product {
                        id: *only,
                        tier: CascadeTier::Code,
                    });
                }
                [] => {}
                _ => {
                    if acc.extend(hits) {
                        return None;
                    }
                }
            }
        }

        // 2) The whole keyword phrase and its replacements, over product
        // fields, one tier at a time.
        let terms = self.table.expand(query);
        let fields = self.product_fields();
        let boolean = self.config.search.use_boolean_fulltext;
        for (kind, tier) in PRODUCT_TIERS {
            if acc.is_full() {
                return None;
            }
            let hits = candidates.match_terms(&terms, &fields, kind, boolean);
            debug!(tier = tier.label(), hits = hits.len(), "cascade stage");
            match hits.as_slice() {
                [only] => return Some(SearchOutcome::Product { id: *only, tier }),
                [] => {}
                _ => {
                    if acc.extend(hits) {
                        return None;
                    }
                }
            }
        }

        // 3) The same tiers over group names. A subsection-restricted
        // search stays inside its section, so groups are skipped.
        if request.section.is_none() {
            for (kind, tier) in GROUP_TIERS {
                if acc.is_full() {
                    return None;
                }
                let groups = self.catalog.match_groups(&terms, kind, boolean);
                debug!(tier = tier.label(), hits = groups.len(), "cascade stage");
                match groups.as_slice() {
                    [only] => return Some(SearchOutcome::Group { id: *only, tier }),
                    [] => {}
                    _ => {
                        let members = self.group_members(groups.iter().copied());
                        let hits = candidates.restrict_to(&members);
                        match hits.as_slice() {
                            [only] => {
                                return Some(SearchOutcome::Product { id: *only, tier });
                            }
                            [] => {}
                            _ => {
                                if acc.extend(hits) {
                                    return None;
                                }
                            }
                        }
                    }
                }
            }
        }

        None
    }

    /// Title/menu-title plus the configured extra searchable fields.
    fn product_fields(&self) -> Vec<String> {
        let mut fields = vec!["Title".to_string(), "MenuTitle".to_string()];
        for extra in &self.config.search.extra_fulltext_fields {
            if !fields.contains(extra) {
                fields.push(extra.clone());
            }
        }
        fields
    }

    /// Deduplicated union of the groups' member product ids, in group order.
    fn group_members(
        &self,
        groups: impl Iterator<Item = crate::model::types::GroupId>,
    ) -> Vec<ProductId> {
        let mut members = Vec::new();
        for gid in groups {
            if let Some(group) = self.catalog.group(gid) {
                for id in &group.product_ids {
                    if !members.contains(id) {
                        members.push(*id);
                    }
                }
            }
        }
        members
    }
}
