//! Mock road router for testing and offline runs.
//!
//! Drives at a constant speed along the great circle, so results are
//! deterministic and need no network. Specific destinations (or specific
//! origin/destination pairs) can be made to fail.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{Coordinate, distance_km};
use crate::estimate::RoadRouter;

use super::error::RoutingError;

/// Default driving speed for the mock router.
const DEFAULT_SPEED_KMH: f64 = 30.0;

/// Coordinates closer than this are treated as the same point.
const SAME_POINT_KM: f64 = 0.001;

#[derive(Debug, Clone)]
struct Blocked {
    from: Option<Coordinate>,
    to: Coordinate,
    error: RoutingError,
}

impl Blocked {
    fn matches(&self, from: Coordinate, to: Coordinate) -> bool {
        let same = |a: Coordinate, b: Coordinate| distance_km(a, b) < SAME_POINT_KM;
        same(self.to, to) && self.from.is_none_or(|f| same(f, from))
    }
}

/// Mock road router with a fixed speed.
#[derive(Debug, Clone)]
pub struct MockRoadRouter {
    speed_kmh: f64,
    blocked: Vec<Blocked>,
    calls: Arc<AtomicUsize>,
}

impl Default for MockRoadRouter {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_KMH)
    }
}

impl MockRoadRouter {
    /// Create a mock router driving at `speed_kmh`.
    pub fn new(speed_kmh: f64) -> Self {
        Self {
            speed_kmh,
            blocked: Vec::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Report no route to `to` from anywhere.
    pub fn with_unreachable(mut self, to: Coordinate) -> Self {
        self.blocked.push(Blocked {
            from: None,
            to,
            error: RoutingError::Unavailable,
        });
        self
    }

    /// Fail every route from `from` to `to` with the given error.
    pub fn with_failing_route(mut self, from: Coordinate, to: Coordinate, error: RoutingError) -> Self {
        self.blocked.push(Blocked {
            from: Some(from),
            to,
            error,
        });
        self
    }

    /// Number of routes requested so far (shared between clones).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn compute(&self, from: Coordinate, to: Coordinate) -> Result<f64, RoutingError> {
        if let Some(blocked) = self.blocked.iter().find(|b| b.matches(from, to)) {
            return Err(blocked.error.clone());
        }
        Ok(distance_km(from, to) / self.speed_kmh * 3600.0)
    }
}

impl RoadRouter for MockRoadRouter {
    async fn route(&self, from: Coordinate, to: Coordinate) -> Result<f64, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.compute(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[tokio::test]
    async fn constant_speed() {
        let router = MockRoadRouter::new(60.0);
        let from = coord(35.68, 139.77);
        let to = coord(35.70, 139.75);

        let secs = router.route(from, to).await.unwrap();
        let expected = distance_km(from, to) * 60.0;
        assert!((secs - expected).abs() < 1e-6);
        assert_eq!(router.call_count(), 1);
    }

    #[tokio::test]
    async fn unreachable_destination() {
        let blocked = coord(35.70, 139.75);
        let router = MockRoadRouter::default().with_unreachable(blocked);

        let result = router.route(coord(35.68, 139.77), blocked).await;
        assert_eq!(result, Err(RoutingError::Unavailable));

        // Other destinations still work
        assert!(router.route(coord(35.68, 139.77), coord(35.0, 139.0)).await.is_ok());
    }

    #[tokio::test]
    async fn failing_pair_only_affects_that_origin() {
        let a = coord(35.68, 139.77);
        let b = coord(35.60, 139.70);
        let dest = coord(35.70, 139.75);
        let router = MockRoadRouter::default().with_failing_route(
            a,
            dest,
            RoutingError::Failed("timeout".into()),
        );

        assert_eq!(
            router.route(a, dest).await,
            Err(RoutingError::Failed("timeout".into()))
        );
        assert!(router.route(b, dest).await.is_ok());
    }

    #[tokio::test]
    async fn clones_share_call_count() {
        let router = MockRoadRouter::default();
        let clone = router.clone();
        let p = coord(35.0, 139.0);

        clone.route(p, p).await.unwrap();
        assert_eq!(router.call_count(), 1);
    }
}
