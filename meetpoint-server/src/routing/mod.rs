//! Road-routing collaborator.
//!
//! Car travel times come from an external route service. This module
//! provides an HTTP client for OSRM-compatible services and a mock router
//! that needs no network.
//!
//! Key characteristics:
//! - One route per request, never alternates
//! - Coordinates go on the wire as `lon,lat`
//! - "No route" is reported as [`RoutingError::Unavailable`]; everything
//!   else (transport, status, parse errors) is [`RoutingError::Failed`]

mod any;
mod client;
mod error;
mod mock;
mod types;

pub use any::AnyRoadRouter;
pub use client::{HttpRoadRouter, RoutingConfig};
pub use error::RoutingError;
pub use mock::MockRoadRouter;
pub use types::{Route, RouteResponse};
