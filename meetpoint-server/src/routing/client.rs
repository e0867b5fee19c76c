//! HTTP road-routing client.
//!
//! Talks to an OSRM-compatible route service. One request is made per
//! (origin, destination) pair, asking for a single route with no
//! alternatives and no geometry.

use std::sync::Arc;

use reqwest::StatusCode;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::Coordinate;
use crate::estimate::RoadRouter;

use super::error::RoutingError;
use super::types::RouteResponse;

/// Default base URL: the public OSRM demo server.
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default routing profile.
const DEFAULT_PROFILE: &str = "driving";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Longest response body kept in error messages.
const MAX_ERROR_BODY: usize = 200;

/// Configuration for the road-routing client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Base URL of the route service
    pub base_url: String,
    /// Routing profile (path segment after `/route/v1/`)
    pub profile: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RoutingConfig {
    /// Create a config pointing at the given route service.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the routing profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 10,
        }
    }
}

/// Road router backed by an OSRM-compatible HTTP service.
///
/// Uses a semaphore to limit concurrent requests so a wide search does not
/// flood the route service.
#[derive(Debug, Clone)]
pub struct HttpRoadRouter {
    http: reqwest::Client,
    base_url: String,
    profile: String,
    semaphore: Arc<Semaphore>,
}

impl HttpRoadRouter {
    /// Create a new client with the given configuration.
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            profile: config.profile,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// URL of the route request between two points.
    ///
    /// OSRM takes coordinates as `lon,lat`.
    fn route_url(&self, from: Coordinate, to: Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}",
            self.base_url,
            self.profile,
            from.lon(),
            from.lat(),
            to.lon(),
            to.lat()
        )
    }

    /// Fetch the duration of the primary car route.
    pub async fn fetch_route(&self, from: Coordinate, to: Coordinate) -> Result<f64, RoutingError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RoutingError::Failed("router semaphore closed".to_string()))?;

        let url = self.route_url(from, to);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("alternatives", "false"),
                ("overview", "false"),
                ("steps", "false"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::Failed("rate limited by route service".to_string()));
        }

        // OSRM reports "no route" as a 400 with a JSON body, so try the body
        // before giving up on a non-success status.
        let parsed = serde_json::from_str::<RouteResponse>(&body);

        if !status.is_success() {
            return match parsed {
                Ok(parsed) if parsed.code != "Ok" => parsed.into_duration(),
                _ => Err(RoutingError::Failed(format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    body.chars().take(MAX_ERROR_BODY).collect::<String>()
                ))),
            };
        }

        let parsed = parsed.map_err(|e| {
            debug!(url = %url, error = %e, "Unparseable route response");
            RoutingError::Failed(format!("invalid route response: {e}"))
        })?;

        parsed.into_duration()
    }
}

impl RoadRouter for HttpRoadRouter {
    async fn route(&self, from: Coordinate, to: Coordinate) -> Result<f64, RoutingError> {
        self.fetch_route(from, to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = RoutingConfig::new("http://localhost:5000")
            .with_profile("car")
            .with_max_concurrent(2)
            .with_timeout(3);

        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.profile, "car");
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn config_defaults() {
        let config = RoutingConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.profile, DEFAULT_PROFILE);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn client_creation() {
        let client = HttpRoadRouter::new(RoutingConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn route_url_uses_lon_lat_order() {
        let client = HttpRoadRouter::new(RoutingConfig::new("http://localhost:5000/")).unwrap();
        let from = Coordinate::new(35.68, 139.77).unwrap();
        let to = Coordinate::new(35.7, 139.75).unwrap();

        assert_eq!(
            client.route_url(from, to),
            "http://localhost:5000/route/v1/driving/139.770000,35.680000;139.750000,35.700000"
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_a_failure() {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let client =
            HttpRoadRouter::new(RoutingConfig::new("http://127.0.0.1:9").with_timeout(2)).unwrap();
        let p = Coordinate::new(35.68, 139.77).unwrap();

        let result = client.route(p, p).await;
        assert!(matches!(result, Err(RoutingError::Failed(_))));
    }
}
