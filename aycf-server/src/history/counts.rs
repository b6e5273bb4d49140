//! Pair counting over windowed records.

use std::collections::HashMap;

use crate::domain::{City, PairCount, RouteAppearance};

/// Count appearances per directed (from, to) pair.
///
/// Every record counts once; the whole method's signal is "how many
/// observation days did we see this route", and the loader emits one record
/// per observed row. Output is sorted by count descending, then by
/// (from, to) lexically so ties are deterministic.
pub fn count_pairs(records: &[RouteAppearance]) -> Vec<PairCount> {
    let mut table: HashMap<(&City, &City), u32> = HashMap::new();
    for record in records {
        *table.entry((&record.from, &record.to)).or_insert(0) += 1;
    }

    let mut counts: Vec<PairCount> = table
        .into_iter()
        .map(|((from, to), appearances)| PairCount::new(from.clone(), to.clone(), appearances))
        .collect();

    counts.sort_by(|a, b| {
        b.appearances
            .cmp(&a.appearances)
            .then_with(|| a.from.cmp(&b.from))
            .then_with(|| a.to.cmp(&b.to))
    });

    counts
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_records() -> impl Strategy<Value = Vec<RouteAppearance>> {
        proptest::collection::vec(("[A-E]", "[A-E]"), 0..60).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(from, to)| RouteAppearance {
                    from: City::normalise(&from),
                    to: City::normalise(&to),
                    observed_at: None,
                })
                .collect()
        })
    }

    proptest! {
        /// Counts sum back to the number of input records.
        #[test]
        fn counts_are_conserved(records in arb_records()) {
            let counts = count_pairs(&records);
            let total: u32 = counts.iter().map(|c| c.appearances).sum();
            prop_assert_eq!(total as usize, records.len());
        }

        /// Output order is deterministic for a fixed input.
        #[test]
        fn deterministic(records in arb_records()) {
            prop_assert_eq!(count_pairs(&records), count_pairs(&records));
        }

        /// Output is sorted by count descending.
        #[test]
        fn sorted_descending(records in arb_records()) {
            let counts = count_pairs(&records);
            for window in counts.windows(2) {
                prop_assert!(window[0].appearances >= window[1].appearances);
            }
        }
    }
}
