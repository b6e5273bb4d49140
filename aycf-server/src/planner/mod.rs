//! Itinerary scoring over aggregated route counts.
//!
//! Turns the pair-count table from [`crate::history`] into ranked round-trip
//! suggestions: base → hub → target out, target → best return hub → base
//! home. The pipeline is a handful of filters and hash joins over typed
//! records; every call is a pure function of the counts and the request.

mod suggest;
mod weights;

pub use suggest::{Planner, SuggestOutcome, SuggestRequest, suggest_itineraries};
pub use weights::ScoreWeights;
