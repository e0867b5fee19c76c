//! Travel-time estimation.
//!
//! One operation covers every transport mode so the planner never has to
//! care how a number was produced. The two modes differ in fidelity:
//!
//! - **Car** times come from a real road route, via a [`RoadRouter`].
//! - **Rail** times are a distance proxy computed locally: an average line
//!   speed plus fixed allowances for transferring and reaching the platform.
//!   There is no timetable or transit graph behind them.

use std::future::Future;

use tracing::trace;

use crate::domain::{Coordinate, TransportMode, distance_km};
use crate::routing::RoutingError;

/// Assumed average rail speed, including dwell and waiting time.
pub const RAIL_AVERAGE_SPEED_KMH: f64 = 40.0;

/// Fixed allowance for changing trains.
pub const RAIL_TRANSFER_ALLOWANCE_SECS: f64 = 600.0;

/// Fixed allowance for getting to and into the departure station.
pub const RAIL_ACCESS_ALLOWANCE_SECS: f64 = 300.0;

/// Trait for computing automobile routes.
///
/// This abstraction allows the estimator to be tested with a mock router.
pub trait RoadRouter {
    /// Expected duration in seconds of a single (non-alternate) car route.
    ///
    /// Fails with [`RoutingError::Unavailable`] when no route exists.
    fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> impl Future<Output = Result<f64, RoutingError>> + Send;
}

impl<R: RoadRouter> RoadRouter for &R {
    fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> impl Future<Output = Result<f64, RoutingError>> + Send {
        (**self).route(from, to)
    }
}

/// Estimated rail travel time in seconds.
///
/// `distance / 40 km/h + 600 s transfer + 300 s access`. Never fails.
///
/// ```
/// use meetpoint_server::domain::Coordinate;
/// use meetpoint_server::estimate::rail_travel_secs;
///
/// let here = Coordinate::new(35.68, 139.77).unwrap();
/// assert_eq!(rail_travel_secs(here, here), 900.0);
/// ```
pub fn rail_travel_secs(from: Coordinate, to: Coordinate) -> f64 {
    let riding = distance_km(from, to) / RAIL_AVERAGE_SPEED_KMH * 3600.0;
    riding + RAIL_TRANSFER_ALLOWANCE_SECS + RAIL_ACCESS_ALLOWANCE_SECS
}

/// Mode-agnostic travel-time estimator.
#[derive(Debug, Clone)]
pub struct TravelTimeEstimator<R> {
    router: R,
}

impl<R: RoadRouter> TravelTimeEstimator<R> {
    /// Create an estimator that routes cars through `router`.
    pub fn new(router: R) -> Self {
        Self { router }
    }

    /// Access the underlying road router.
    pub fn router(&self) -> &R {
        &self.router
    }

    /// Estimate the travel time in seconds from `from` to `to`.
    ///
    /// Rail estimates never fail. Car estimates surface the router's error.
    pub async fn estimate(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TransportMode,
    ) -> Result<f64, RoutingError> {
        let secs = match mode {
            TransportMode::Rail => rail_travel_secs(from, to),
            TransportMode::Car => self.router.route(from, to).await?,
        };

        trace!(%from, %to, %mode, secs, "Estimated travel time");

        Ok(secs)
    }
}
