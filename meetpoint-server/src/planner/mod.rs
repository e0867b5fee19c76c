//! Meeting-point planner.
//!
//! This module answers: "Given where everyone is starting from, which
//! station should the group meet at?"
//!
//! The search takes the stations nearest the group's centroid, estimates
//! every member's travel time to each of them, drops the ones somebody
//! cannot reach and ranks the rest by total or worst-case travel time.

mod config;
mod rank;
mod result;
mod search;

pub use config::{CANDIDATE_COUNT_RANGE, OptimizationMode, RESULT_COUNT_RANGE, SearchConfig};
pub use rank::rank_candidates;
pub use result::{CandidateResult, SearchOutcome, TravelTimeEntry};
pub use search::{MIN_MEMBERS, Planner, SearchError, SearchRequest};
