//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::error;

use crate::domain::{City, Selection};
use crate::history::{HistoryError, snapshot_file_count};
use crate::live::LiveError;
use crate::planner::{Planner, SuggestRequest};

use super::dto::*;
use super::options::default_options;
use super::state::AppState;
use super::templates::*;

/// Lookback bounds in days; requests outside are clamped, not rejected.
const LOOKBACK_RANGE: (u32, u32) = (7, 730);
const DEFAULT_LOOKBACK_DAYS: u32 = 180;

/// Result-cap bounds; requests outside are clamped, not rejected.
const TOP_N_RANGE: (usize, usize) = (1, 200);
const DEFAULT_TOP_N: usize = 25;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/suggest", post(suggest))
        .route("/api/live", get(live_check))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}

/// Health check with corpus visibility.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let files = snapshot_file_count(&state.config.data_dir);
    Json(HealthResponse {
        status: "ok",
        data_dir: state.config.data_dir.display().to_string(),
        files,
    })
}

/// Index page with the search form.
async fn index_page() -> impl IntoResponse {
    let template = IndexTemplate {
        options: default_options(),
    };
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Compute itinerary suggestions.
async fn suggest(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure.
    let req: SuggestApiRequest = serde_json::from_slice(&body).map_err(|e| {
        error!(body = %String::from_utf8_lossy(&body), "suggest request JSON parse error: {e}");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let lookback_days = req
        .lookback_days
        .unwrap_or(DEFAULT_LOOKBACK_DAYS)
        .clamp(LOOKBACK_RANGE.0, LOOKBACK_RANGE.1);
    let top_n = req
        .top_n
        .unwrap_or(DEFAULT_TOP_N)
        .clamp(TOP_N_RANGE.0, TOP_N_RANGE.1);
    let require_return_to_base = req.require_return_to_base.unwrap_or(true);

    // Extend targets with the comma-separated custom field.
    let mut targets = req.targets.clone();
    if let Some(custom) = &req.custom_targets {
        targets.extend(
            custom
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        );
    }

    let selection = Selection::new(&req.bases, &req.hubs, &targets);
    if selection.is_degenerate() {
        return Err(AppError::BadRequest {
            message: "Please select at least one base, one hub, and one target destination."
                .to_string(),
        });
    }

    let request = SuggestRequest {
        lookback_days,
        selection,
        require_return_to_base,
        top_n,
    };

    let planner = Planner::new(&state.config.data_dir, (*state.weights).clone());
    let outcome = planner.suggest(&request)?;

    // An empty outcome is a valid "no suggestions found", never an error.
    if accepts_html(&headers) {
        let template = ResultsTemplate {
            suggestions: outcome
                .suggestions
                .iter()
                .map(SuggestionView::from_suggestion)
                .collect(),
            lookback_days,
            files_contributing: outcome.files_contributing,
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(SuggestResponse {
            suggestions: outcome
                .suggestions
                .iter()
                .map(SuggestionResult::from_suggestion)
                .collect(),
            lookback_days,
            files_scanned: outcome.files_scanned,
            files_contributing: outcome.files_contributing,
        })
        .into_response())
    }
}

/// Live availability check for a single route and date.
async fn live_check(
    State(state): State<AppState>,
    Query(req): Query<LiveCheckRequest>,
) -> Result<Json<LiveCheckResponse>, AppError> {
    let Some(probe) = &state.probe else {
        return Err(AppError::NotConfigured {
            message: "live availability probing is not configured".to_string(),
        });
    };

    let from = City::normalise(&req.from);
    let to = City::normalise(&req.to);
    if from.is_empty() || to.is_empty() {
        return Err(AppError::BadRequest {
            message: "both from and to cities are required".to_string(),
        });
    }

    let status = probe.fetch_availability(&from, &to, req.date).await?;

    Ok(Json(LiveCheckResponse {
        from: from.to_string(),
        to: to.to_string(),
        date: req.date.format("%Y-%m-%d").to_string(),
        status: status.as_str().to_string(),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    DataUnavailable { message: String },
    NotConfigured { message: String },
    Internal { message: String },
}

impl From<HistoryError> for AppError {
    fn from(e: HistoryError) -> Self {
        // Both variants mean "fix your data directory"; keep them distinct
        // from the empty-result case, which is not an error at all.
        AppError::DataUnavailable {
            message: e.to_string(),
        }
    }
}

impl From<LiveError> for AppError {
    fn from(e: LiveError) -> Self {
        match e {
            LiveError::NoSession => AppError::NotConfigured {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::DataUnavailable { message } => {
                (StatusCode::SERVICE_UNAVAILABLE, message.clone())
            }
            AppError::NotConfigured { message } => {
                (StatusCode::SERVICE_UNAVAILABLE, message.clone())
            }
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        error!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_errors_map_to_data_unavailable() {
        let err: AppError = HistoryError::NoDataFound {
            dir: std::path::PathBuf::from("/data"),
        }
        .into();
        assert!(matches!(err, AppError::DataUnavailable { .. }));
    }

    #[test]
    fn live_no_session_maps_to_not_configured() {
        let err: AppError = LiveError::NoSession.into();
        assert!(matches!(err, AppError::NotConfigured { .. }));
    }

    #[test]
    fn accepts_html_checks_accept_header() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_html(&headers));

        headers.insert(header::ACCEPT, "application/json".parse().unwrap());
        assert!(!accepts_html(&headers));

        headers.insert(header::ACCEPT, "text/html,application/xhtml+xml".parse().unwrap());
        assert!(accepts_html(&headers));
    }
}
