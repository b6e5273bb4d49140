//! "Fly anywhere" itinerary planner server.
//!
//! A web application that mines historical route-appearance snapshots from a
//! low-cost carrier's stand-by fare tool and suggests base → hub → target
//! round trips, ranked by how often each leg has appeared in the corpus.

pub mod config;
pub mod domain;
pub mod history;
pub mod live;
pub mod planner;
pub mod refresh;
pub mod web;
