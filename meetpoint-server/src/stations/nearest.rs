//! Nearest-station selection.
//!
//! A full scan with a stable sort. At catalog sizes in the low tens of
//! thousands this is a few milliseconds, and the stable sort gives the
//! tie-break for free: equidistant stations keep catalog order.

use std::sync::Arc;

use crate::domain::{Coordinate, Station, distance_km};

/// A station paired with its distance to the query point.
#[derive(Debug, Clone)]
pub struct NearbyStation {
    pub station: Arc<Station>,
    pub distance_km: f64,
}

/// The `limit` stations nearest to `to`, closest first, with distances.
///
/// Ties keep catalog order. Returns fewer than `limit` entries when the
/// catalog is smaller, and nothing for an empty catalog or a zero limit.
pub fn nearest_with_distance(
    to: Coordinate,
    catalog: &[Arc<Station>],
    limit: usize,
) -> Vec<NearbyStation> {
    if limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<NearbyStation> = catalog
        .iter()
        .map(|station| NearbyStation {
            station: Arc::clone(station),
            distance_km: distance_km(to, station.location),
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(limit);
    ranked
}

/// The `limit` stations nearest to `to`, closest first.
pub fn nearest_stations(to: Coordinate, catalog: &[Arc<Station>], limit: usize) -> Vec<Arc<Station>> {
    nearest_with_distance(to, catalog, limit)
        .into_iter()
        .map(|nearby| nearby.station)
        .collect()
}
