//! Route history aggregation.
//!
//! Loads every historical snapshot under a data directory, normalises city
//! names, applies a lookback window and counts appearances per directed
//! city pair. Every call reloads the corpus from disk: the aggregator holds
//! no state, so a concurrently refreshed directory is simply picked up on
//! the next request.

mod counts;
mod error;
mod loader;
mod window;

use std::path::Path;

use tracing::debug;

use crate::domain::PairCount;

pub use counts::count_pairs;
pub use error::HistoryError;
pub use loader::{LoadedHistory, load_history, snapshot_file_count};
pub use window::filter_by_lookback;

/// Aggregated pair counts plus corpus observability counters.
#[derive(Debug, Clone)]
pub struct Aggregation {
    /// Appearance counts, sorted by count descending then city pair.
    pub counts: Vec<PairCount>,

    /// Snapshot files found under the data directory.
    pub files_scanned: usize,

    /// Files that contributed at least one row.
    pub files_contributing: usize,

    /// Files skipped because they could not be read or lacked the required
    /// columns.
    pub files_skipped: usize,
}

/// Load the corpus, apply the lookback window and count pairs.
///
/// The lookback cutoff is derived from the wall clock at call time. Records
/// without a parseable timestamp always survive the window.
pub fn aggregate(data_dir: &Path, lookback_days: u32) -> Result<Aggregation, HistoryError> {
    let history = load_history(data_dir)?;
    let total = history.records.len();
    let windowed = filter_by_lookback(history.records, lookback_days);

    debug!(
        files_scanned = history.files_scanned,
        files_skipped = history.files_skipped,
        records = total,
        in_window = windowed.len(),
        lookback_days,
        "aggregated route history"
    );

    Ok(Aggregation {
        counts: count_pairs(&windowed),
        files_scanned: history.files_scanned,
        files_contributing: history.files_contributing,
        files_skipped: history.files_skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn aggregate_counts_untimestamped_rows() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("run1.csv"),
            "departure_from,departure_to\nLiverpool,Budapest\nLiverpool,Budapest\nBudapest,Kutaisi\n",
        )
        .unwrap();

        let agg = aggregate(dir.path(), 7).unwrap();

        assert_eq!(agg.files_scanned, 1);
        assert_eq!(agg.files_contributing, 1);
        assert_eq!(agg.files_skipped, 0);
        assert_eq!(agg.counts.len(), 2);
        // Highest count first.
        assert_eq!(agg.counts[0].from.as_str(), "Liverpool");
        assert_eq!(agg.counts[0].appearances, 2);
    }

    #[test]
    fn aggregate_empty_dir_is_no_data() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            aggregate(dir.path(), 180),
            Err(HistoryError::NoDataFound { .. })
        ));
    }
}
