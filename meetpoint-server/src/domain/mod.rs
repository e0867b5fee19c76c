//! Domain types for the meeting-point finder.
//!
//! This module contains the value types shared by the catalog, the
//! travel-time estimator and the planner. Types that carry invariants
//! enforce them at construction time, so code that receives them can
//! trust their validity.

mod coordinate;
mod member;
mod station;

pub use coordinate::{Coordinate, EARTH_RADIUS_KM, InvalidCoordinate, distance_km};
pub use member::{InvalidMemberId, Member, MemberId, TransportMode};
pub use station::{Station, StationId};
