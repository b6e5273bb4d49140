//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Suggestion;

/// Request to compute itinerary suggestions.
#[derive(Debug, Deserialize)]
pub struct SuggestApiRequest {
    /// Base cities (where trips start and end).
    pub bases: Vec<String>,

    /// Hub cities (the connection layer).
    pub hubs: Vec<String>,

    /// Target cities (where the user wants to get to).
    pub targets: Vec<String>,

    /// Comma-separated extra targets appended to `targets`.
    pub custom_targets: Option<String>,

    /// Days of history to consider (clamped to 7–730, default 180).
    pub lookback_days: Option<u32>,

    /// Require an observed return-hub→base appearance (default true).
    pub require_return_to_base: Option<bool>,

    /// Maximum suggestions to return (clamped to 1–200, default 25).
    pub top_n: Option<usize>,
}

/// One suggested round trip.
#[derive(Debug, Serialize)]
pub struct SuggestionResult {
    /// Outbound path, e.g. "Liverpool → Budapest → Kutaisi".
    pub itinerary: String,

    /// Return path, e.g. "Kutaisi → Budapest → Liverpool".
    #[serde(rename = "return")]
    pub return_path: String,

    /// Observed appearance count per leg.
    pub base_to_hub: u32,
    pub hub_to_target: u32,
    pub target_to_hub: u32,
    pub hub_to_base: u32,

    /// Composite score, rounded to two decimals.
    pub score: f64,
}

impl SuggestionResult {
    pub fn from_suggestion(suggestion: &Suggestion) -> Self {
        Self {
            itinerary: suggestion.outbound(),
            return_path: suggestion.inbound(),
            base_to_hub: suggestion.base_to_hub,
            hub_to_target: suggestion.hub_to_target,
            target_to_hub: suggestion.target_to_hub,
            hub_to_base: suggestion.hub_to_base,
            score: (suggestion.score * 100.0).round() / 100.0,
        }
    }
}

/// Response for the suggestion endpoint.
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<SuggestionResult>,

    /// The lookback actually used, after clamping.
    pub lookback_days: u32,

    /// Snapshot files found in the corpus.
    pub files_scanned: usize,

    /// Snapshot files that contributed rows.
    pub files_contributing: usize,
}

/// Response for the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub data_dir: String,
    pub files: usize,
}

/// Query for a live availability check.
#[derive(Debug, Deserialize)]
pub struct LiveCheckRequest {
    pub from: String,
    pub to: String,

    /// Travel date, YYYY-MM-DD.
    pub date: chrono::NaiveDate,
}

/// Response for a live availability check.
#[derive(Debug, Serialize)]
pub struct LiveCheckResponse {
    pub from: String,
    pub to: String,
    pub date: String,
    pub status: String,
}

/// Error payload for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::City;

    #[test]
    fn suggestion_result_rounds_score() {
        let suggestion = Suggestion {
            base: City::normalise("A"),
            hub: City::normalise("H"),
            target: City::normalise("T"),
            return_hub: City::normalise("H"),
            base_to_hub: 1,
            hub_to_target: 2,
            target_to_hub: 3,
            hub_to_base: 0,
            score: 6.599_999_999_999_999,
        };

        let result = SuggestionResult::from_suggestion(&suggestion);
        assert_eq!(result.score, 6.6);
        assert_eq!(result.itinerary, "A → H → T");
        assert_eq!(result.return_path, "T → H → A");
    }

    #[test]
    fn suggest_response_serialises_return_field() {
        let response = SuggestResponse {
            suggestions: vec![],
            lookback_days: 180,
            files_scanned: 4,
            files_contributing: 3,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["lookback_days"], 180);
        assert_eq!(json["files_scanned"], 4);
    }
}
