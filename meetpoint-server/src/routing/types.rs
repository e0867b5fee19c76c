//! Response types for the OSRM-compatible route service.
//!
//! Only the fields needed for a travel duration are modelled; everything
//! else in the response is ignored.

use serde::Deserialize;

use super::error::RoutingError;

/// Top-level response of `GET /route/v1/{profile}/{coordinates}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    /// `"Ok"` on success, otherwise an error code such as `"NoRoute"`.
    pub code: String,

    /// Human-readable error detail, present on failures.
    #[serde(default)]
    pub message: Option<String>,

    /// Routes, best first. Only one is requested.
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// A single route.
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    /// Expected travel time in seconds.
    pub duration: f64,
}

/// Codes meaning the router understood the request but found no road.
const NO_ROUTE_CODES: &[&str] = &["NoRoute", "NoSegment"];

impl RouteResponse {
    /// Extract the duration of the primary route.
    pub fn into_duration(self) -> Result<f64, RoutingError> {
        if self.code == "Ok" {
            let route = self.routes.first().ok_or(RoutingError::Unavailable)?;
            if !route.duration.is_finite() || route.duration < 0.0 {
                return Err(RoutingError::Failed(format!(
                    "invalid route duration: {}",
                    route.duration
                )));
            }
            return Ok(route.duration);
        }

        if NO_ROUTE_CODES.contains(&self.code.as_str()) {
            return Err(RoutingError::Unavailable);
        }

        Err(RoutingError::Failed(match self.message {
            Some(message) => format!("{}: {}", self.code, message),
            None => self.code,
        }))
    }
}
