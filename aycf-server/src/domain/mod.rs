//! Domain types for the itinerary planner.
//!
//! City names from the upstream corpus are free-form strings; every type
//! here holds them in normalised form, so code that receives these types
//! can compare and group them directly.

mod city;
mod route;
mod selection;
mod suggestion;

pub use city::City;
pub use route::{PairCount, RouteAppearance};
pub use selection::Selection;
pub use suggestion::Suggestion;
