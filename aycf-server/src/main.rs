use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use aycf_server::config::AppConfig;
use aycf_server::live::{AvailabilityProbe, HttpProbe, ProbeConfig};
use aycf_server::planner::ScoreWeights;
use aycf_server::refresh::{DataRefresher, RefreshConfig, RefreshOutcome};
use aycf_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // All environment reads happen here, once.
    let config = AppConfig::from_env();
    info!(data_dir = %config.data_dir.display(), "starting itinerary planner");

    // Bring the corpus cache up to date before serving. A failed first
    // refresh is survivable: the planner reports NoDataFound per request
    // until the background task succeeds.
    let refresher = DataRefresher::new(
        RefreshConfig::new(&config.cache_root)
            .with_upstream_url(&config.upstream_zip_url)
            .with_refresh_interval(config.refresh_interval),
    )
    .expect("Failed to create data refresher");

    match refresher.update_if_stale(false).await {
        Ok(RefreshOutcome::Updated) => info!("corpus downloaded from upstream"),
        Ok(RefreshOutcome::Fresh) => info!("corpus cache is fresh"),
        Ok(RefreshOutcome::StaleButUsable { error }) => {
            warn!(%error, "using stale corpus cache")
        }
        Err(e) => warn!(error = %e, "initial refresh failed; starting without a local corpus"),
    }

    // Re-check the upstream periodically.
    let refresh_interval = config.refresh_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match refresher.update_if_stale(false).await {
                Ok(outcome) => info!(?outcome, "periodic refresh done"),
                Err(e) => warn!(error = %e, "periodic refresh failed"),
            }
        }
    });

    // Live probing only runs when a session cookie was provided.
    let probe: Option<Arc<dyn AvailabilityProbe>> = match &config.live_session_cookie {
        Some(cookie) => {
            let probe = HttpProbe::new(ProbeConfig::new().with_session_cookie(cookie))
                .expect("Failed to create live availability probe");
            Some(Arc::new(probe))
        }
        None => None,
    };

    let port = config.port;
    let state = AppState::new(config, ScoreWeights::default(), probe);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
