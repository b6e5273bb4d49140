//! HTTP implementation of the availability probe.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::City;

use super::{AvailabilityProbe, LiveError, LiveStatus, Session};

/// Default base URL of the live availability API.
const DEFAULT_BASE_URL: &str = "https://multipass.wizzair.com/api";

/// Availability query path under the base URL.
const SEARCH_PATH: &str = "/search/availability";

/// Configuration for the HTTP probe.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Base URL for the live API.
    pub base_url: String,

    /// Session cookie presented on every query. Without one the probe
    /// refuses to run.
    pub session_cookie: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ProbeConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_cookie: None,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the session cookie.
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Request body for the availability query.
#[derive(Debug, Serialize)]
struct AvailabilityQuery<'a> {
    #[serde(rename = "flightType")]
    flight_type: &'static str,
    origin: &'a str,
    destination: &'a str,
    #[serde(rename = "departureDate")]
    departure_date: String,
}

/// The slice of the live response we care about.
#[derive(Debug, Deserialize)]
struct AvailabilityReply {
    availability: Option<String>,
}

/// Probe backed by the carrier's live API over HTTP.
pub struct HttpProbe {
    http: reqwest::Client,
    config: ProbeConfig,
}

impl HttpProbe {
    pub fn new(config: ProbeConfig) -> Result<Self, LiveError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl AvailabilityProbe for HttpProbe {
    async fn ensure_session(&self) -> Result<Session, LiveError> {
        let cookie = self
            .config
            .session_cookie
            .clone()
            .ok_or(LiveError::NoSession)?;
        Ok(Session {
            cookie,
            acquired_at: Utc::now(),
        })
    }

    async fn fetch_availability(
        &self,
        origin: &City,
        destination: &City,
        date: NaiveDate,
    ) -> Result<LiveStatus, LiveError> {
        let session = self.ensure_session().await?;

        let query = AvailabilityQuery {
            flight_type: "OW",
            origin: origin.as_str(),
            destination: destination.as_str(),
            departure_date: date.format("%Y-%m-%d").to_string(),
        };

        let url = format!("{}{}", self.config.base_url, SEARCH_PATH);
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::COOKIE, session.cookie)
            .json(&query)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let reply: AvailabilityReply =
            serde_json::from_str(&body).map_err(|e| LiveError::Payload(e.to_string()))?;

        Ok(match reply.availability.as_deref() {
            Some("AVAILABLE") => LiveStatus::Available,
            Some("NOT_AVAILABLE") | Some("SOLD_OUT") => LiveStatus::NotAvailable,
            _ => LiveStatus::Unknown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ProbeConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.session_cookie.is_none());
    }

    #[test]
    fn config_builders() {
        let config = ProbeConfig::new()
            .with_base_url("http://localhost:9999")
            .with_session_cookie("session=abc");
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.session_cookie.as_deref(), Some("session=abc"));
    }

    #[tokio::test]
    async fn no_cookie_means_no_session() {
        let probe = HttpProbe::new(ProbeConfig::new()).unwrap();
        assert!(matches!(
            probe.ensure_session().await,
            Err(LiveError::NoSession)
        ));
    }

    #[tokio::test]
    async fn fetch_without_session_fails_before_any_request() {
        let probe = HttpProbe::new(ProbeConfig::new()).unwrap();
        let result = probe
            .fetch_availability(
                &City::normalise("Liverpool"),
                &City::normalise("Budapest"),
                NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            )
            .await;
        assert!(matches!(result, Err(LiveError::NoSession)));
    }
}
