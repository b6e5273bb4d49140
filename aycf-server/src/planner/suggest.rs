//! Suggestion pipeline: leg filters, joins, scoring, ranking.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

use crate::domain::{City, PairCount, Selection, Suggestion};
use crate::history::{self, HistoryError};

use super::weights::ScoreWeights;

/// Parameters for one suggestion request.
#[derive(Debug, Clone)]
pub struct SuggestRequest {
    /// Days of history to consider. Callers clamp this upstream.
    pub lookback_days: u32,

    /// Base, hub and target city sets.
    pub selection: Selection,

    /// Require at least one observed return-hub→base appearance.
    pub require_return_to_base: bool,

    /// Maximum number of suggestions to return.
    pub top_n: usize,
}

/// Suggestions plus the corpus counters surfaced alongside them.
#[derive(Debug, Clone)]
pub struct SuggestOutcome {
    pub suggestions: Vec<Suggestion>,
    pub files_scanned: usize,
    pub files_contributing: usize,
}

/// Ties the aggregator and the scorer together for the web layer.
///
/// Holds no corpus state: every call re-reads the data directory, so a
/// refreshed corpus is picked up on the next request.
#[derive(Debug, Clone)]
pub struct Planner {
    data_dir: PathBuf,
    weights: ScoreWeights,
}

impl Planner {
    pub fn new(data_dir: impl Into<PathBuf>, weights: ScoreWeights) -> Self {
        Self {
            data_dir: data_dir.into(),
            weights,
        }
    }

    /// Aggregate the corpus and rank itineraries for one request.
    pub fn suggest(&self, request: &SuggestRequest) -> Result<SuggestOutcome, HistoryError> {
        let aggregation = history::aggregate(&self.data_dir, request.lookback_days)?;
        let suggestions = suggest_itineraries(
            &aggregation.counts,
            &request.selection,
            request.require_return_to_base,
            request.top_n,
            &self.weights,
        );

        Ok(SuggestOutcome {
            suggestions,
            files_scanned: aggregation.files_scanned,
            files_contributing: aggregation.files_contributing,
        })
    }
}

/// Rank round-trip itineraries over an aggregated pair-count table.
///
/// Joins, in order:
/// 1. base→hub counts inner-joined with hub→target counts on the hub; an
///    empty join means no suggestions, not an error;
/// 2. target→hub counts left-joined on the target, keeping the single
///    best-appearing return hub per target (ties broken by hub name) and
///    falling back to the outbound hub with a zero count;
/// 3. hub→base counts left-joined on (return hub, base), zero-filled.
///
/// With `require_return_to_base`, candidates whose return hub has never
/// been seen flying back to the base are dropped. Survivors are scored as
/// a weighted sum of the four leg counts and sorted best-first with a
/// deterministic tie-break.
pub fn suggest_itineraries(
    counts: &[PairCount],
    selection: &Selection,
    require_return_to_base: bool,
    top_n: usize,
    weights: &ScoreWeights,
) -> Vec<Suggestion> {
    // Leg 1: base → hub.
    let outbound: Vec<&PairCount> = counts
        .iter()
        .filter(|c| selection.is_base(&c.from) && selection.is_hub(&c.to))
        .collect();

    // Leg 2: hub → target, indexed by hub.
    let mut onward: HashMap<&City, Vec<(&City, u32)>> = HashMap::new();
    for c in counts
        .iter()
        .filter(|c| selection.is_hub(&c.from) && selection.is_target(&c.to))
    {
        onward.entry(&c.from).or_default().push((&c.to, c.appearances));
    }

    // Inner join legs 1 and 2 on the hub.
    let mut joined: Vec<(&City, &City, &City, u32, u32)> = Vec::new();
    for leg1 in &outbound {
        let Some(targets) = onward.get(&leg1.to) else {
            continue;
        };
        for &(target, hub_to_target) in targets {
            joined.push((&leg1.from, &leg1.to, target, leg1.appearances, hub_to_target));
        }
    }

    debug!(
        leg1 = outbound.len(),
        hubs_with_targets = onward.len(),
        candidates = joined.len(),
        "joined outbound legs"
    );

    if joined.is_empty() {
        return Vec::new();
    }

    // Leg 3: best-appearing return hub per target. The corpus offers no
    // ordering guarantee, so the max count wins and ties go to the
    // lexically smaller hub name.
    let mut best_return: HashMap<&City, (&City, u32)> = HashMap::new();
    for c in counts
        .iter()
        .filter(|c| selection.is_target(&c.from) && selection.is_hub(&c.to))
    {
        best_return
            .entry(&c.from)
            .and_modify(|(hub, appearances)| {
                if c.appearances > *appearances
                    || (c.appearances == *appearances && c.to < **hub)
                {
                    *hub = &c.to;
                    *appearances = c.appearances;
                }
            })
            .or_insert((&c.to, c.appearances));
    }

    // Leg 4: return hub → base, keyed for the left join.
    let home: HashMap<(&City, &City), u32> = counts
        .iter()
        .filter(|c| selection.is_hub(&c.from) && selection.is_base(&c.to))
        .map(|c| ((&c.from, &c.to), c.appearances))
        .collect();

    let mut suggestions: Vec<Suggestion> = joined
        .into_iter()
        .filter_map(|(base, hub, target, base_to_hub, hub_to_target)| {
            // Left join: a target with no observed way back keeps the
            // outbound hub and a zero count.
            let (return_hub, target_to_hub) =
                best_return.get(target).copied().unwrap_or((hub, 0));
            let hub_to_base = home.get(&(return_hub, base)).copied().unwrap_or(0);

            if require_return_to_base && hub_to_base == 0 {
                return None;
            }

            let score = f64::from(base_to_hub)
                + f64::from(hub_to_target)
                + weights.return_leg * f64::from(target_to_hub)
                + weights.home_leg(require_return_to_base) * f64::from(hub_to_base);

            Some(Suggestion {
                base: base.clone(),
                hub: hub.clone(),
                target: target.clone(),
                return_hub: return_hub.clone(),
                base_to_hub,
                hub_to_target,
                target_to_hub,
                hub_to_base,
                score,
            })
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.base.cmp(&b.base))
            .then_with(|| a.hub.cmp(&b.hub))
            .then_with(|| a.target.cmp(&b.target))
            .then_with(|| a.return_hub.cmp(&b.return_hub))
    });
    suggestions.truncate(top_n);
    suggestions
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Small closed world: cities A/B are bases, H1/H2 hubs, T1/T2 targets.
    /// Pairs are deduplicated the way real aggregation output is.
    fn arb_counts() -> impl Strategy<Value = Vec<PairCount>> {
        let city = proptest::sample::select(vec!["A", "B", "H1", "H2", "T1", "T2"]);
        proptest::collection::btree_map((city.clone(), city), 1u32..20, 0..30).prop_map(|rows| {
            rows.into_iter()
                .map(|((from, to), n)| {
                    PairCount::new(City::normalise(&from), City::normalise(&to), n)
                })
                .collect()
        })
    }

    fn world_selection() -> Selection {
        Selection::new(["A", "B"], ["H1", "H2"], ["T1", "T2"])
    }

    proptest! {
        /// With the return requirement on, every suggestion has an
        /// observed hub→base leg.
        #[test]
        fn required_return_implies_positive_home_leg(counts in arb_counts()) {
            let result = suggest_itineraries(
                &counts, &world_selection(), true, 50, &ScoreWeights::default());
            for s in &result {
                prop_assert!(s.hub_to_base > 0);
            }
        }

        /// Identical inputs yield identical output, including order.
        #[test]
        fn idempotent(counts in arb_counts(), require in any::<bool>()) {
            let a = suggest_itineraries(
                &counts, &world_selection(), require, 50, &ScoreWeights::default());
            let b = suggest_itineraries(
                &counts, &world_selection(), require, 50, &ScoreWeights::default());
            prop_assert_eq!(a, b);
        }

        /// Result length never exceeds the cap, and relaxing the cap never
        /// changes the prefix.
        #[test]
        fn truncation(counts in arb_counts(), top_n in 0usize..10) {
            let capped = suggest_itineraries(
                &counts, &world_selection(), false, top_n, &ScoreWeights::default());
            let full = suggest_itineraries(
                &counts, &world_selection(), false, usize::MAX, &ScoreWeights::default());

            prop_assert!(capped.len() <= top_n);
            prop_assert_eq!(capped.len(), top_n.min(full.len()));
            prop_assert_eq!(capped.as_slice(), &full[..capped.len()]);
        }

        /// Scores decrease (weakly) down the ranking.
        #[test]
        fn ranked_by_score(counts in arb_counts(), require in any::<bool>()) {
            let result = suggest_itineraries(
                &counts, &world_selection(), require, 50, &ScoreWeights::default());
            for window in result.windows(2) {
                prop_assert!(window[0].score >= window[1].score);
            }
        }

        /// Every score matches the weighted-sum formula.
        #[test]
        fn score_formula_holds(counts in arb_counts(), require in any::<bool>()) {
            let weights = ScoreWeights::default();
            let result = suggest_itineraries(
                &counts, &world_selection(), require, 50, &weights);
            for s in &result {
                let expected = f64::from(s.base_to_hub)
                    + f64::from(s.hub_to_target)
                    + weights.return_leg * f64::from(s.target_to_hub)
                    + weights.home_leg(require) * f64::from(s.hub_to_base);
                prop_assert_eq!(s.score, expected);
            }
        }

        /// An empty selection never errors and never produces output.
        #[test]
        fn empty_selection_is_empty_result(counts in arb_counts()) {
            let empty = Selection::default();
            let result = suggest_itineraries(
                &counts, &empty, false, 50, &ScoreWeights::default());
            prop_assert!(result.is_empty());
        }
    }
}
