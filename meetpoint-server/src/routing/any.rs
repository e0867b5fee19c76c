//! Runtime choice between the HTTP and mock routers.

use crate::domain::Coordinate;
use crate::estimate::RoadRouter;

use super::client::HttpRoadRouter;
use super::error::RoutingError;
use super::mock::MockRoadRouter;

/// A road router picked at startup.
///
/// Lets the web layer hold one concrete type whichever router is configured.
#[derive(Debug, Clone)]
pub enum AnyRoadRouter {
    Http(HttpRoadRouter),
    Mock(MockRoadRouter),
}

impl RoadRouter for AnyRoadRouter {
    async fn route(&self, from: Coordinate, to: Coordinate) -> Result<f64, RoutingError> {
        match self {
            AnyRoadRouter::Http(router) => router.route(from, to).await,
            AnyRoadRouter::Mock(router) => router.route(from, to).await,
        }
    }
}

impl From<HttpRoadRouter> for AnyRoadRouter {
    fn from(router: HttpRoadRouter) -> Self {
        AnyRoadRouter::Http(router)
    }
}

impl From<MockRoadRouter> for AnyRoadRouter {
    fn from(router: MockRoadRouter) -> Self {
        AnyRoadRouter::Mock(router)
    }
}
