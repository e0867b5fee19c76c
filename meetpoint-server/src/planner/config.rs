//! Search configuration for the meeting-point planner.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Recommended bounds for the number of candidate stations.
pub const CANDIDATE_COUNT_RANGE: RangeInclusive<usize> = 30..=100;

/// Recommended bounds for the number of returned results.
pub const RESULT_COUNT_RANGE: RangeInclusive<usize> = 3..=10;

/// What the ranking minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OptimizationMode {
    /// Smallest sum of everyone's travel time.
    #[default]
    #[serde(rename = "total")]
    MinTotal,
    /// Smallest worst-case travel time.
    #[serde(rename = "max")]
    MinMax,
}

impl fmt::Display for OptimizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationMode::MinTotal => f.write_str("total"),
            OptimizationMode::MinMax => f.write_str("max"),
        }
    }
}

/// Configuration parameters for a meeting-point search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of stations nearest the centroid to evaluate.
    pub candidate_count: usize,

    /// Maximum number of ranked results to return.
    pub result_count: usize,

    /// Number of candidates evaluated concurrently.
    /// Higher values finish sooner but put more load on the router.
    pub batch_size: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(candidate_count: usize, result_count: usize, batch_size: usize) -> Self {
        Self {
            candidate_count,
            result_count,
            batch_size,
        }
    }

    /// Set the candidate count.
    pub fn with_candidate_count(mut self, n: usize) -> Self {
        self.candidate_count = n;
        self
    }

    /// Set the result count.
    pub fn with_result_count(mut self, n: usize) -> Self {
        self.result_count = n;
        self
    }

    /// Returns a copy with counts pulled into the recommended bounds.
    pub fn clamped(&self) -> Self {
        Self {
            candidate_count: self
                .candidate_count
                .clamp(*CANDIDATE_COUNT_RANGE.start(), *CANDIDATE_COUNT_RANGE.end()),
            result_count: self
                .result_count
                .clamp(*RESULT_COUNT_RANGE.start(), *RESULT_COUNT_RANGE.end()),
            batch_size: self.batch_size.max(1),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            candidate_count: 50,
            result_count: 5,
            batch_size: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.candidate_count, 50);
        assert_eq!(config.result_count, 5);
        assert_eq!(config.batch_size, 8);
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(30, 3, 16);

        assert_eq!(config.candidate_count, 30);
        assert_eq!(config.result_count, 3);
        assert_eq!(config.batch_size, 16);
    }

    #[test]
    fn builders() {
        let config = SearchConfig::default()
            .with_candidate_count(70)
            .with_result_count(10);

        assert_eq!(config.candidate_count, 70);
        assert_eq!(config.result_count, 10);
    }

    #[test]
    fn clamped_pulls_into_bounds() {
        let low = SearchConfig::new(1, 0, 0).clamped();
        assert_eq!(low.candidate_count, 30);
        assert_eq!(low.result_count, 3);
        assert_eq!(low.batch_size, 1);

        let high = SearchConfig::new(500, 50, 8).clamped();
        assert_eq!(high.candidate_count, 100);
        assert_eq!(high.result_count, 10);
    }

    #[test]
    fn clamped_keeps_in_range_values() {
        let config = SearchConfig::new(42, 7, 4).clamped();
        assert_eq!(config.candidate_count, 42);
        assert_eq!(config.result_count, 7);
        assert_eq!(config.batch_size, 4);
    }

    #[test]
    fn mode_serde() {
        assert_eq!(
            serde_json::to_string(&OptimizationMode::MinMax).unwrap(),
            "\"max\""
        );
        let mode: OptimizationMode = serde_json::from_str("\"total\"").unwrap();
        assert_eq!(mode, OptimizationMode::MinTotal);
        assert_eq!(OptimizationMode::default(), OptimizationMode::MinTotal);
    }
}
