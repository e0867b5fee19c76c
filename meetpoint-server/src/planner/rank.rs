//! Candidate ranking for search results.

use std::cmp::Ordering;

use super::config::OptimizationMode;
use super::result::CandidateResult;

impl OptimizationMode {
    /// The figure this mode minimizes, in seconds.
    pub fn score(&self, result: &CandidateResult) -> f64 {
        match self {
            OptimizationMode::MinTotal => result.total_secs(),
            OptimizationMode::MinMax => result.max_secs(),
        }
    }
}

/// Compare two candidates under `mode`.
///
/// Candidates are ranked by:
/// 1. The mode's score (total or max travel time, smaller is better)
/// 2. Proximity to the centroid (closer is better)
fn compare(mode: OptimizationMode, a: &CandidateResult, b: &CandidateResult) -> Ordering {
    mode.score(a)
        .total_cmp(&mode.score(b))
        .then_with(|| a.proximity_rank().cmp(&b.proximity_rank()))
}

/// Rank candidates by preference.
///
/// Returns candidates sorted best-first.
pub fn rank_candidates(
    mut candidates: Vec<CandidateResult>,
    mode: OptimizationMode,
) -> Vec<CandidateResult> {
    candidates.sort_by(|a, b| compare(mode, a, b));
    candidates
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Coordinate, Member, MemberId, Station, StationId, TransportMode};
    use crate::planner::TravelTimeEntry;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn candidates_strategy() -> impl Strategy<Value = Vec<CandidateResult>> {
        proptest::collection::vec(proptest::collection::vec(0.0f64..20_000.0, 2..5), 0..20).prop_map(
            |all| {
                all.into_iter()
                    .enumerate()
                    .map(|(rank, durations)| {
                        let entries = durations
                            .iter()
                            .enumerate()
                            .map(|(i, secs)| {
                                let member = Member::new(
                                    MemberId::positional(i),
                                    format!("M{i}"),
                                    TransportMode::Rail,
                                );
                                TravelTimeEntry::new(&member, *secs)
                            })
                            .collect();
                        let station = Arc::new(Station::new(
                            StationId(rank as u32),
                            format!("S{rank}"),
                            Coordinate::new(35.0, 139.0).unwrap(),
                            "",
                            0,
                        ));
                        CandidateResult::new(station, rank, 0.0, entries)
                    })
                    .collect()
            },
        )
    }

    fn mode_strategy() -> impl Strategy<Value = OptimizationMode> {
        prop_oneof![Just(OptimizationMode::MinTotal), Just(OptimizationMode::MinMax)]
    }

    proptest! {
        /// Ranked output is sorted by the mode's score
        #[test]
        fn sorted_by_score(candidates in candidates_strategy(), mode in mode_strategy()) {
            let ranked = rank_candidates(candidates, mode);
            for pair in ranked.windows(2) {
                prop_assert!(mode.score(&pair[0]) <= mode.score(&pair[1]));
            }
        }

        /// Ranking is a permutation: nothing added or lost
        #[test]
        fn preserves_candidates(candidates in candidates_strategy(), mode in mode_strategy()) {
            let mut before: Vec<u32> = candidates.iter().map(|c| c.station().id.0).collect();
            let ranked = rank_candidates(candidates, mode);
            let mut after: Vec<u32> = ranked.iter().map(|c| c.station().id.0).collect();
            before.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before, after);
        }

        /// Equal scores keep nearest-to-centroid order
        #[test]
        fn equal_scores_keep_proximity_order(candidates in candidates_strategy(), mode in mode_strategy()) {
            let ranked = rank_candidates(candidates, mode);
            for pair in ranked.windows(2) {
                if mode.score(&pair[0]) == mode.score(&pair[1]) {
                    prop_assert!(pair[0].proximity_rank() < pair[1].proximity_rank());
                }
            }
        }
    }
}
