//! Mock availability probe for testing without API access.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::domain::City;

use super::{AvailabilityProbe, LiveError, LiveStatus, Session};

/// Probe serving canned answers keyed by (origin, destination).
///
/// Routes without a canned answer report [`LiveStatus::Unknown`], matching
/// the real probe's behaviour on unrecognised payloads.
#[derive(Debug, Clone, Default)]
pub struct MockProbe {
    responses: HashMap<(City, City), LiveStatus>,
}

impl MockProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned answer for a route.
    pub fn insert(&mut self, origin: &str, destination: &str, status: LiveStatus) {
        self.responses.insert(
            (City::normalise(origin), City::normalise(destination)),
            status,
        );
    }
}

#[async_trait]
impl AvailabilityProbe for MockProbe {
    async fn ensure_session(&self) -> Result<Session, LiveError> {
        Ok(Session {
            cookie: "mock-session".to_string(),
            acquired_at: Utc::now(),
        })
    }

    async fn fetch_availability(
        &self,
        origin: &City,
        destination: &City,
        _date: NaiveDate,
    ) -> Result<LiveStatus, LiveError> {
        Ok(self
            .responses
            .get(&(origin.clone(), destination.clone()))
            .copied()
            .unwrap_or(LiveStatus::Unknown))
    }
}
