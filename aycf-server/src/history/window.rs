//! Lookback windowing of raw records.

use chrono::{Duration, NaiveDateTime, Utc};

use crate::domain::RouteAppearance;

/// Keep records observed within the last `lookback_days`, plus every record
/// with an unknown timestamp.
///
/// The cutoff is re-derived from the wall clock on every call; nothing is
/// cached between requests.
pub fn filter_by_lookback(
    records: Vec<RouteAppearance>,
    lookback_days: u32,
) -> Vec<RouteAppearance> {
    filter_by_lookback_at(records, lookback_days, Utc::now().naive_utc())
}

/// Windowing against an explicit `now`, the testable seam behind
/// [`filter_by_lookback`].
fn filter_by_lookback_at(
    records: Vec<RouteAppearance>,
    lookback_days: u32,
    now: NaiveDateTime,
) -> Vec<RouteAppearance> {
    let cutoff = now - Duration::days(i64::from(lookback_days));
    records
        .into_iter()
        .filter(|record| record.observed_at.is_none_or(|at| at >= cutoff))
        .collect()
}
