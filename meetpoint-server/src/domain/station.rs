//! Stations that can serve as meeting points.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Catalog key of a station (the numeric station code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub u32);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station loaded from the catalog.
///
/// Stations are immutable once loaded. The catalog owns them and search
/// results share them through `Arc<Station>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub location: Coordinate,
    /// Line or route the station is listed under.
    pub line: String,
    /// Region (prefecture) code.
    pub region_code: u16,
}

impl Station {
    pub fn new(
        id: StationId,
        name: impl Into<String>,
        location: Coordinate,
        line: impl Into<String>,
        region_code: u16,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            line: line.into(),
            region_code,
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line.is_empty() {
            write!(f, "{} [{}]", self.name, self.id)
        } else {
            write!(f, "{} ({}) [{}]", self.name, self.line, self.id)
        }
    }
}
