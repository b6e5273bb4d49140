//! Raw and aggregated route-appearance records.

use chrono::NaiveDateTime;

use super::City;

/// One observed appearance of a directed route in a historical snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteAppearance {
    /// Departure city, normalised.
    pub from: City,

    /// Arrival city, normalised.
    pub to: City,

    /// When the snapshot recording this appearance was generated.
    ///
    /// `None` when the source row carried no timestamp or an unparseable
    /// one; such records are never dropped by the lookback window.
    pub observed_at: Option<NaiveDateTime>,
}

/// Appearance count for a directed city pair within a lookback window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairCount {
    pub from: City,
    pub to: City,
    pub appearances: u32,
}

impl PairCount {
    pub fn new(from: City, to: City, appearances: u32) -> Self {
        Self {
            from,
            to,
            appearances,
        }
    }
}
