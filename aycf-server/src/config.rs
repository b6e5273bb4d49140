//! Process configuration.
//!
//! All environment access happens here, once, at startup. The rest of the
//! crate receives an [`AppConfig`] by reference and never reads globals,
//! so the scoring path stays a pure function of its arguments.

use std::path::PathBuf;
use std::time::Duration;

use crate::refresh::DEFAULT_UPSTREAM_ZIP;

/// Application configuration, built once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory of historical snapshot files the planner reads.
    pub data_dir: PathBuf,

    /// Root of the refresh cache (stamp file, temp space, managed `data/`).
    pub cache_root: PathBuf,

    /// Upstream archive URL for the refresh job.
    pub upstream_zip_url: String,

    /// How often the background task re-checks the upstream.
    pub refresh_interval: Duration,

    /// Port for the HTTP listener.
    pub port: u16,

    /// Session cookie for the live availability API; live probing stays
    /// disabled without one.
    pub live_session_cookie: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let cache_root = PathBuf::from("cache");
        Self {
            data_dir: cache_root.join("data"),
            cache_root,
            upstream_zip_url: DEFAULT_UPSTREAM_ZIP.to_string(),
            refresh_interval: Duration::from_secs(24 * 60 * 60),
            port: 5000,
            live_session_cookie: None,
        }
    }
}

impl AppConfig {
    /// Build the configuration from the environment.
    ///
    /// Unset variables fall back to the defaults; malformed numeric values
    /// do too rather than aborting startup.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cache_root = std::env::var("AYCF_CACHE_ROOT")
            .map(PathBuf::from)
            .unwrap_or(defaults.cache_root);

        // Unless pointed elsewhere, read the corpus the refresh job manages.
        let data_dir = std::env::var("AYCF_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| cache_root.join("data"));

        let upstream_zip_url =
            std::env::var("AYCF_UPSTREAM_ZIP").unwrap_or(defaults.upstream_zip_url);

        let refresh_interval = std::env::var("AYCF_REFRESH_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.refresh_interval);

        let port = std::env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.port);

        let live_session_cookie = std::env::var("AYCF_LIVE_COOKIE")
            .ok()
            .filter(|cookie| !cookie.trim().is_empty());

        Self {
            data_dir,
            cache_root,
            upstream_zip_url,
            refresh_interval,
            port,
            live_session_cookie,
        }
    }
}
