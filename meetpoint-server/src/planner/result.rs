//! Search results.

use std::sync::Arc;

use crate::domain::{Coordinate, Member, MemberId, Station, TransportMode};

/// One member's travel time to one candidate station.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelTimeEntry {
    pub member_id: MemberId,
    pub member_name: String,
    /// Where the member sets off from, as they named it.
    pub departure_label: String,
    pub duration_secs: f64,
    pub mode: TransportMode,
}

impl TravelTimeEntry {
    /// Record `member`'s travel time using their own transport mode.
    pub fn new(member: &Member, duration_secs: f64) -> Self {
        Self {
            member_id: member.id.clone(),
            member_name: member.name.clone(),
            departure_label: member.departure_label.clone(),
            duration_secs,
            mode: member.mode,
        }
    }
}

/// A fully evaluated candidate station.
///
/// Holds one entry per member, in member order. The total and maximum are
/// computed at construction, so they always agree with the entries.
#[derive(Debug, Clone)]
pub struct CandidateResult {
    station: Arc<Station>,
    entries: Vec<TravelTimeEntry>,
    total_secs: f64,
    max_secs: f64,
    proximity_rank: usize,
    distance_from_centroid_km: f64,
}

impl CandidateResult {
    /// Build a result from a candidate and its per-member entries.
    ///
    /// `proximity_rank` is the candidate's position in the
    /// nearest-to-centroid order (0 = closest).
    pub fn new(
        station: Arc<Station>,
        proximity_rank: usize,
        distance_from_centroid_km: f64,
        entries: Vec<TravelTimeEntry>,
    ) -> Self {
        let total_secs = entries.iter().map(|e| e.duration_secs).sum();
        let max_secs = entries
            .iter()
            .map(|e| e.duration_secs)
            .fold(0.0, f64::max);

        Self {
            station,
            entries,
            total_secs,
            max_secs,
            proximity_rank,
            distance_from_centroid_km,
        }
    }

    pub fn station(&self) -> &Arc<Station> {
        &self.station
    }

    /// Per-member travel times, in member order.
    pub fn entries(&self) -> &[TravelTimeEntry] {
        &self.entries
    }

    /// Sum of every member's travel time, in seconds.
    pub fn total_secs(&self) -> f64 {
        self.total_secs
    }

    /// Longest single travel time, in seconds.
    pub fn max_secs(&self) -> f64 {
        self.max_secs
    }

    pub fn proximity_rank(&self) -> usize {
        self.proximity_rank
    }

    pub fn distance_from_centroid_km(&self) -> f64 {
        self.distance_from_centroid_km
    }
}

/// Result of a successful search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Mean of the members' departure points.
    pub centroid: Coordinate,

    /// Number of candidate stations evaluated.
    pub candidates_evaluated: usize,

    /// Candidates dropped because some member could not be routed there.
    pub candidates_dropped: usize,

    /// Surviving candidates, best first, truncated to the result count.
    pub results: Vec<CandidateResult>,
}

impl SearchOutcome {
    /// True when every candidate was dropped (no reachable meeting point).
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;

    fn station() -> Arc<Station> {
        Arc::new(Station::new(
            StationId(1),
            "Tokyo",
            Coordinate::new(35.681, 139.767).unwrap(),
            "Yamanote",
            13,
        ))
    }

    fn member(id: &str, mode: TransportMode) -> Member {
        Member::new(MemberId::parse(id).unwrap(), id.to_uppercase(), mode)
    }

    #[test]
    fn entry_copies_member_details() {
        let m = member("a", TransportMode::Car).with_departure_label("Shibuya");
        let entry = TravelTimeEntry::new(&m, 600.0);

        assert_eq!(entry.member_id.as_str(), "a");
        assert_eq!(entry.member_name, "A");
        assert_eq!(entry.departure_label, "Shibuya");
        assert_eq!(entry.mode, TransportMode::Car);
        assert_eq!(entry.duration_secs, 600.0);
    }

    #[test]
    fn aggregates_match_entries() {
        let entries = vec![
            TravelTimeEntry::new(&member("a", TransportMode::Rail), 1200.0),
            TravelTimeEntry::new(&member("b", TransportMode::Car), 1800.0),
            TravelTimeEntry::new(&member("c", TransportMode::Rail), 900.0),
        ];

        let result = CandidateResult::new(station(), 0, 1.5, entries);

        assert_eq!(result.total_secs(), 3900.0);
        assert_eq!(result.max_secs(), 1800.0);
        assert_eq!(result.entries().len(), 3);
        assert_eq!(result.entries()[1].member_id.as_str(), "b");
        assert_eq!(result.distance_from_centroid_km(), 1.5);
    }

    #[test]
    fn outcome_is_empty() {
        let outcome = SearchOutcome {
            centroid: Coordinate::new(35.0, 139.0).unwrap(),
            candidates_evaluated: 3,
            candidates_dropped: 3,
            results: vec![],
        };
        assert!(outcome.is_empty());
    }
}
