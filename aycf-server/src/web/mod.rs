//! Web layer for the itinerary planner.
//!
//! Provides the search form, the suggestion endpoint and a health check.

mod dto;
mod options;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use options::default_options;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
