//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, InvalidMemberId, Member, MemberId, Station, TransportMode};
use crate::planner::{CandidateResult, OptimizationMode, SearchOutcome, TravelTimeEntry};
use crate::stations::NearbyStation;

/// Render a duration as `"{h}h {m}m"`, or `"{m}m"` under an hour.
///
/// Whole minutes only; seconds are truncated.
pub fn format_duration(secs: f64) -> String {
    let minutes = (secs.max(0.0) / 60.0) as u64;
    let (h, m) = (minutes / 60, minutes % 60);
    if h > 0 {
        format!("{h}h {m}m")
    } else {
        format!("{m}m")
    }
}

/// Query for stations near a point.
#[derive(Debug, Deserialize)]
pub struct NearbyStationsRequest {
    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lon: f64,

    /// Maximum results (default 10, capped at 50)
    pub limit: Option<usize>,
}

/// Response for a nearby-stations query.
#[derive(Debug, Serialize)]
pub struct NearbyStationsResponse {
    pub stations: Vec<NearbyStationResult>,
}

/// A station and how far it is from the query point.
#[derive(Debug, Serialize)]
pub struct NearbyStationResult {
    #[serde(flatten)]
    pub station: StationResult,

    /// Great-circle distance in kilometres
    pub distance_km: f64,
}

impl NearbyStationResult {
    pub fn from_nearby(nearby: &NearbyStation) -> Self {
        Self {
            station: StationResult::from_station(&nearby.station),
            distance_km: nearby.distance_km,
        }
    }
}

/// A station in responses.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Catalog station code
    pub id: u32,

    /// Station name
    pub name: String,

    /// Line the station is listed under
    pub line: String,

    pub lat: f64,
    pub lon: f64,
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.0,
            name: station.name.clone(),
            line: station.line.clone(),
            lat: station.location.lat(),
            lon: station.location.lon(),
        }
    }
}

/// One member of the group in a meeting-point request.
#[derive(Debug, Deserialize)]
pub struct MemberRequest {
    /// Caller-chosen identifier (defaults to "member-N")
    pub id: Option<String>,

    /// Display name
    pub name: String,

    /// Where the member sets off from
    pub departure: Option<Coordinate>,

    /// Place name the departure was picked from
    #[serde(default)]
    pub departure_label: String,

    /// How the member travels (default "rail")
    #[serde(default)]
    pub mode: TransportMode,
}

impl MemberRequest {
    /// Convert to a domain member. `index` names members without an id.
    pub fn into_member(self, index: usize) -> Result<Member, InvalidMemberId> {
        let id = match self.id {
            Some(id) => MemberId::parse(&id)?,
            None => MemberId::positional(index),
        };

        let mut member = Member::new(id, self.name, self.mode).with_departure_label(self.departure_label);
        member.departure = self.departure;
        Ok(member)
    }
}

/// Request to find a meeting point.
#[derive(Debug, Deserialize)]
pub struct MeetingPointRequest {
    /// The group
    pub members: Vec<MemberRequest>,

    /// "total" (default) or "max"
    #[serde(default)]
    pub optimization: OptimizationMode,

    /// Candidate stations to evaluate (clamped to 30-100)
    pub candidate_count: Option<usize>,

    /// Results to return (clamped to 3-10)
    pub result_count: Option<usize>,
}

/// Response for a meeting-point search.
#[derive(Debug, Serialize)]
pub struct MeetingPointResponse {
    /// When the search ran
    pub searched_at: DateTime<Local>,

    /// Mean of the members' departure points
    pub centroid: Coordinate,

    /// Number of candidate stations evaluated
    pub candidates_evaluated: usize,

    /// Candidates some member could not reach
    pub candidates_dropped: usize,

    /// Best meeting stations first
    pub results: Vec<MeetingResult>,
}

impl MeetingPointResponse {
    pub fn from_outcome(outcome: &SearchOutcome, searched_at: DateTime<Local>) -> Self {
        Self {
            searched_at,
            centroid: outcome.centroid,
            candidates_evaluated: outcome.candidates_evaluated,
            candidates_dropped: outcome.candidates_dropped,
            results: outcome
                .results
                .iter()
                .map(MeetingResult::from_candidate)
                .collect(),
        }
    }
}

/// A ranked meeting station.
#[derive(Debug, Serialize)]
pub struct MeetingResult {
    pub station: StationResult,

    /// Sum of everyone's travel time, in seconds
    pub total_secs: f64,

    /// Longest single travel time, in seconds
    pub max_secs: f64,

    /// Total formatted for display (e.g. "1h 5m")
    pub total_display: String,

    /// Maximum formatted for display
    pub max_display: String,

    pub distance_from_centroid_km: f64,

    /// Per-member travel times, in request order
    pub members: Vec<MemberTimeResult>,
}

impl MeetingResult {
    pub fn from_candidate(candidate: &CandidateResult) -> Self {
        Self {
            station: StationResult::from_station(candidate.station()),
            total_secs: candidate.total_secs(),
            max_secs: candidate.max_secs(),
            total_display: format_duration(candidate.total_secs()),
            max_display: format_duration(candidate.max_secs()),
            distance_from_centroid_km: candidate.distance_from_centroid_km(),
            members: candidate
                .entries()
                .iter()
                .map(MemberTimeResult::from_entry)
                .collect(),
        }
    }
}

/// One member's travel time to a meeting station.
#[derive(Debug, Serialize)]
pub struct MemberTimeResult {
    pub member_id: MemberId,
    pub member_name: String,

    /// Place name the member departs from (empty when not given)
    pub departure_label: String,

    pub mode: TransportMode,
    pub duration_secs: f64,

    /// Duration formatted for display
    pub display: String,
}

impl MemberTimeResult {
    pub fn from_entry(entry: &TravelTimeEntry) -> Self {
        Self {
            member_id: entry.member_id.clone(),
            member_name: entry.member_name.clone(),
            departure_label: entry.departure_label.clone(),
            mode: entry.mode,
            duration_secs: entry.duration_secs,
            display: format_duration(entry.duration_secs),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
