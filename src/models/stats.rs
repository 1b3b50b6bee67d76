//! Per-user distance aggregates for the leaderboard.
//!
//! These aggregates are pre-computed when runs are inserted, reducing
//! the ranking query from O(runs) to O(users).

use serde::{Deserialize, Serialize};

use crate::models::Run;

/// Pre-computed totals for a single runner.
///
/// Stored in the `runner_stats` collection, keyed by user ID, and
/// updated atomically with run inserts via Firestore transactions.
/// The display name is denormalized here so the leaderboard never has
/// to join against `users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerStats {
    /// Owning user's ID
    pub user_id: String,
    /// Display name at last update
    pub name: String,
    /// Total runs recorded
    #[serde(default)]
    pub total_runs: u32,
    /// Total distance across all runs (meters)
    #[serde(default)]
    pub total_distance_meters: f64,
    /// Last update timestamp (ISO 8601)
    #[serde(default)]
    pub updated_at: String,
}

impl RunnerStats {
    /// Empty stats for a user who has not recorded a run yet.
    pub fn empty(user_id: &str, name: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: name.to_string(),
            total_runs: 0,
            total_distance_meters: 0.0,
            updated_at: String::new(),
        }
    }

    /// Fold a new run into the totals.
    pub fn update_from_run(&mut self, run: &Run, now: &str) {
        self.total_runs += 1;
        self.total_distance_meters += run.distance_m;
        self.updated_at = now.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_run(id: u32, distance: f64) -> Run {
        Run {
            run_id: format!("run-{}", id),
            user_id: "user-1".to_string(),
            start_time: 1_700_000_000_000,
            duration_ms: 1_800_000,
            distance_m: distance,
            created_at: "2024-01-15T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_update_from_run_accumulates() {
        let mut stats = RunnerStats::empty("user-1", "Ana");

        stats.update_from_run(&make_run(1, 5000.0), "2024-01-15T12:00:00Z");
        stats.update_from_run(&make_run(2, 3000.0), "2024-01-16T09:00:00Z");

        assert_eq!(stats.total_runs, 2);
        assert_eq!(stats.total_distance_meters, 8000.0);
        assert_eq!(stats.updated_at, "2024-01-16T09:00:00Z");
    }

    #[test]
    fn test_empty_stats_start_at_zero() {
        let stats = RunnerStats::empty("user-2", "Bruno");
        assert_eq!(stats.total_runs, 0);
        assert_eq!(stats.total_distance_meters, 0.0);
        assert_eq!(stats.name, "Bruno");
    }
}
