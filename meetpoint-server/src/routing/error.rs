//! Road-routing error types.

/// Errors from the road-routing collaborator.
///
/// The planner treats both kinds the same way (the candidate is dropped),
/// but they are kept apart so logs can tell "no road" from "router broke".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutingError {
    /// The router answered, but has no route between the two points
    #[error("no route available")]
    Unavailable,

    /// Any other router failure (network, HTTP status, bad response, ...)
    #[error("routing failed: {0}")]
    Failed(String),
}

impl From<reqwest::Error> for RoutingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RoutingError::Failed("request timed out".to_string())
        } else {
            RoutingError::Failed(err.to_string())
        }
    }
}
