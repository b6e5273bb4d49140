//! Live availability probing.
//!
//! Everything the planner produces is statistical; this module is the
//! optional glue for confirming a single route against the carrier's live
//! API. It sits behind [`AvailabilityProbe`] so the scoring core never
//! depends on it, and it is disabled entirely unless a session cookie is
//! configured.

mod client;
mod mock;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::City;

pub use client::{HttpProbe, ProbeConfig};
pub use mock::MockProbe;

/// An authenticated session with the live availability API.
#[derive(Debug, Clone)]
pub struct Session {
    /// Cookie header value presented on live queries.
    pub cookie: String,

    /// When the session was obtained.
    pub acquired_at: DateTime<Utc>,
}

/// Result of a live availability check for one route and date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveStatus {
    /// The live API listed the route as bookable.
    Available,

    /// The live API answered and the route was not bookable.
    NotAvailable,

    /// The live API answered in a shape we did not recognise.
    Unknown,
}

impl LiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiveStatus::Available => "available",
            LiveStatus::NotAvailable => "not_available",
            LiveStatus::Unknown => "unknown",
        }
    }
}

/// Errors from the live availability probe.
#[derive(Debug, thiserror::Error)]
pub enum LiveError {
    /// No session is configured; live probing is disabled.
    #[error("no live session configured")]
    NoSession,

    /// The live API request failed.
    #[error("live API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The live API returned a payload we could not interpret.
    #[error("live API returned an unexpected payload: {0}")]
    Payload(String),
}

/// Interface to the carrier's live stand-by availability API.
///
/// Session acquisition in the original tool drove a headless browser
/// through the carrier's login flow; that glue is deliberately not
/// reproduced here. Implementations obtain sessions however they like
/// (configuration, mock data), and callers only ever see this trait.
#[async_trait]
pub trait AvailabilityProbe: Send + Sync {
    /// Obtain a session usable for live queries.
    async fn ensure_session(&self) -> Result<Session, LiveError>;

    /// Check whether a route is bookable on the given date.
    async fn fetch_availability(
        &self,
        origin: &City,
        destination: &City,
        date: NaiveDate,
    ) -> Result<LiveStatus, LiveError>;
}
