//! Meeting-point search.
//!
//! Evaluates the stations nearest the members' centroid, estimating every
//! member's travel time to each one, and ranks the candidates every member
//! can reach.

use std::sync::Arc;

use futures::future::{join_all, try_join_all};
use tracing::{debug, info};

use crate::domain::{Coordinate, Member};
use crate::estimate::{RoadRouter, TravelTimeEstimator};
use crate::routing::RoutingError;
use crate::stations::{CatalogError, NearbyStation, StationCatalog, nearest_with_distance};

use super::config::{OptimizationMode, SearchConfig};
use super::rank::rank_candidates;
use super::result::{CandidateResult, SearchOutcome, TravelTimeEntry};

/// Minimum group size for a search.
pub const MIN_MEMBERS: usize = 2;

/// Error from meeting-point search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A member has no departure point
    #[error("member {member} has no departure point")]
    MissingDeparture { member: String },

    /// Too few members to search for
    #[error("at least {min} members are required, got {count}", min = MIN_MEMBERS)]
    InsufficientMembers { count: usize },

    /// No candidate stations near the centroid
    #[error("no stations found near the group")]
    NoStationsFound,

    /// The station catalog could not be read
    #[error("station catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),
}

/// Request for a meeting-point search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// The group, in display order.
    pub members: Vec<Member>,

    /// What the ranking minimizes.
    pub mode: OptimizationMode,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(members: Vec<Member>, mode: OptimizationMode) -> Self {
        Self { members, mode }
    }

    /// Validate the request, returning each member's departure in order.
    ///
    /// Departure points are checked before the group size.
    pub fn validate(&self) -> Result<Vec<Coordinate>, SearchError> {
        let departures = self
            .members
            .iter()
            .map(|member| {
                member.departure.ok_or_else(|| SearchError::MissingDeparture {
                    member: member.id.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if departures.len() < MIN_MEMBERS {
            return Err(SearchError::InsufficientMembers {
                count: departures.len(),
            });
        }

        Ok(departures)
    }
}

/// Meeting-point planner.
///
/// Holds no state between searches: every call re-reads the catalog and
/// recomputes every estimate.
pub struct Planner<'a, C, R> {
    catalog: &'a C,
    estimator: &'a TravelTimeEstimator<R>,
    config: &'a SearchConfig,
}

impl<'a, C: StationCatalog + Sync, R: RoadRouter + Sync> Planner<'a, C, R> {
    /// Create a new planner.
    pub fn new(
        catalog: &'a C,
        estimator: &'a TravelTimeEstimator<R>,
        config: &'a SearchConfig,
    ) -> Self {
        Self {
            catalog,
            estimator,
            config,
        }
    }

    /// Find the best meeting stations for the group.
    ///
    /// Candidates some member cannot reach are dropped. If every candidate
    /// is dropped the outcome has no results, which is still a success.
    pub async fn find_meeting_point(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchOutcome, SearchError> {
        let departures = request.validate()?;
        let centroid =
            Coordinate::centroid(&departures).ok_or(SearchError::InsufficientMembers { count: 0 })?;

        let stations = self.catalog.all_stations().await?;
        let candidates = nearest_with_distance(centroid, &stations, self.config.candidate_count);
        if candidates.is_empty() {
            return Err(SearchError::NoStationsFound);
        }

        let travellers: Vec<(&Member, Coordinate)> =
            request.members.iter().zip(departures).collect();

        let batch_size = self.config.batch_size.max(1);
        let mut evaluated = Vec::with_capacity(candidates.len());
        let mut dropped = 0;

        for (batch_idx, batch) in candidates.chunks(batch_size).enumerate() {
            let futures: Vec<_> = batch
                .iter()
                .enumerate()
                .map(|(i, nearby)| {
                    let rank = batch_idx * batch_size + i;
                    self.evaluate(&travellers, rank, nearby)
                })
                .collect();

            for (nearby, result) in batch.iter().zip(join_all(futures).await) {
                match result {
                    Ok(candidate) => evaluated.push(candidate),
                    Err(e) => {
                        debug!(
                            station = %nearby.station,
                            error = %e,
                            "Dropping unreachable candidate"
                        );
                        dropped += 1;
                    }
                }
            }
        }

        let mut results = rank_candidates(evaluated, request.mode);
        results.truncate(self.config.result_count);

        info!(
            members = request.members.len(),
            mode = %request.mode,
            %centroid,
            candidates = candidates.len(),
            dropped,
            results = results.len(),
            "Meeting-point search complete"
        );

        Ok(SearchOutcome {
            centroid,
            candidates_evaluated: candidates.len(),
            candidates_dropped: dropped,
            results,
        })
    }

    /// Estimate every member's travel time to one candidate.
    ///
    /// Estimates run concurrently. The first failure abandons the rest, so a
    /// candidate is either fully evaluated or not at all.
    async fn evaluate(
        &self,
        travellers: &[(&Member, Coordinate)],
        proximity_rank: usize,
        nearby: &NearbyStation,
    ) -> Result<CandidateResult, RoutingError> {
        let to = nearby.station.location;

        let estimates: Vec<_> = travellers
            .iter()
            .map(|(member, from)| self.entry(member, *from, to))
            .collect();
        let entries = try_join_all(estimates).await?;

        Ok(CandidateResult::new(
            Arc::clone(&nearby.station),
            proximity_rank,
            nearby.distance_km,
            entries,
        ))
    }

    async fn entry(
        &self,
        member: &Member,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<TravelTimeEntry, RoutingError> {
        let secs = self.estimator.estimate(from, to, member.mode).await?;
        Ok(TravelTimeEntry::new(member, secs))
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
