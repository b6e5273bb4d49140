//! Ranked itinerary candidates.

use super::City;

/// A suggested round trip: base → hub → target out, target → return hub →
/// base home.
///
/// The return hub is usually the outbound hub, but may differ when another
/// hub shows more target→hub traffic. Each leg carries the number of days
/// the corresponding route appeared in the corpus within the lookback
/// window; `hub_to_base` may be zero when returning to base was not
/// required.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub base: City,
    pub hub: City,
    pub target: City,
    pub return_hub: City,
    pub base_to_hub: u32,
    pub hub_to_target: u32,
    pub target_to_hub: u32,
    pub hub_to_base: u32,
    pub score: f64,
}

impl Suggestion {
    /// Outbound path for display, e.g. "Liverpool → Budapest → Kutaisi".
    pub fn outbound(&self) -> String {
        format!("{} → {} → {}", self.base, self.hub, self.target)
    }

    /// Return path for display, e.g. "Kutaisi → Budapest → Liverpool".
    pub fn inbound(&self) -> String {
        format!("{} → {} → {}", self.target, self.return_hub, self.base)
    }
}
