//! Application state for the web layer.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::live::AvailabilityProbe;
use crate::planner::ScoreWeights;

/// Shared application state.
///
/// Handlers read everything from here; none of them touches the
/// environment.
#[derive(Clone)]
pub struct AppState {
    /// Process configuration, built once at startup.
    pub config: Arc<AppConfig>,

    /// Scoring weights applied to every request.
    pub weights: Arc<ScoreWeights>,

    /// Live availability probe, when one is configured.
    pub probe: Option<Arc<dyn AvailabilityProbe>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        config: AppConfig,
        weights: ScoreWeights,
        probe: Option<Arc<dyn AvailabilityProbe>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            weights: Arc::new(weights),
            probe,
        }
    }
}
