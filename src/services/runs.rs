// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run upload processing service.
//!
//! Handles the core workflow:
//! 1. Filter out low-accuracy GPS samples
//! 2. Score the trace (total distance, pace)
//! 3. Store the run and update the owner's stats aggregate

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{GeoPoint, Run};
use crate::services::geo;

/// Process uploaded runs into scored, persisted records.
#[derive(Clone)]
pub struct RunProcessor {
    db: FirestoreDb,
}

impl RunProcessor {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Score and persist an uploaded trace for `user_id`.
    ///
    /// The duration is clamped to zero when the client's end timestamp
    /// precedes its start timestamp (clock skew happens).
    pub async fn process_upload(
        &self,
        user_id: &str,
        start_time: i64,
        end_time: i64,
        points: &[GeoPoint],
    ) -> Result<ScoredRun> {
        let distance_m = geo::total_distance(points).map_err(|e| match e {
            geo::GeoError::InsufficientPoints => AppError::InsufficientPoints,
        })?;

        let duration_ms = (end_time - start_time).max(0);
        let pace_s_per_km = geo::pace_seconds_per_km(duration_ms, distance_m);

        let owner = self
            .db
            .get_user(user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        let run = Run {
            run_id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            start_time,
            duration_ms,
            distance_m,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        self.db.insert_run_atomic(&run, &owner.name).await?;

        tracing::info!(
            user_id,
            run_id = %run.run_id,
            distance_m,
            duration_ms,
            raw_points = points.len(),
            "Run scored and stored"
        );

        Ok(ScoredRun {
            run_id: run.run_id,
            distance_m,
            duration_ms,
            pace_s_per_km,
        })
    }
}

/// Result of scoring an uploaded run.
#[derive(Debug)]
pub struct ScoredRun {
    pub run_id: String,
    pub distance_m: f64,
    pub duration_ms: i64,
    pub pace_s_per_km: Option<f64>,
}
