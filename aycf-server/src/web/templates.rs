//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::Suggestion;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the itinerary search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub options: CityOptions,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Suggestion results fragment.
#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub suggestions: Vec<SuggestionView>,
    pub lookback_days: u32,
    pub files_contributing: usize,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// City option lists for the search form.
#[derive(Debug, Clone)]
pub struct CityOptions {
    pub bases: Vec<CityOption>,
    pub hubs: Vec<CityOption>,
    pub targets: Vec<CityOption>,
}

/// One entry in a multi-select list.
#[derive(Debug, Clone)]
pub struct CityOption {
    pub name: String,
    pub selected: bool,
}

/// Suggestion view model for templates.
#[derive(Debug, Clone)]
pub struct SuggestionView {
    pub itinerary: String,
    pub return_path: String,
    pub base_to_hub: u32,
    pub hub_to_target: u32,
    pub target_to_hub: u32,
    pub hub_to_base: u32,
    pub score: String,
}

impl SuggestionView {
    /// Create from a domain Suggestion.
    pub fn from_suggestion(suggestion: &Suggestion) -> Self {
        Self {
            itinerary: suggestion.outbound(),
            return_path: suggestion.inbound(),
            base_to_hub: suggestion.base_to_hub,
            hub_to_target: suggestion.hub_to_target,
            target_to_hub: suggestion.target_to_hub,
            hub_to_base: suggestion.hub_to_base,
            score: format!("{:.2}", suggestion.score),
        }
    }
}
