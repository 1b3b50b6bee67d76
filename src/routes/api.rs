// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run upload/listing routes and the public leaderboard.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::GeoPoint;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    50
}

const MAX_PER_PAGE: u32 = 100;
const DEFAULT_RANKING_LIMIT: u32 = 50;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/runs", post(upload_run).get(get_runs))
}

/// Public routes that need no identity.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/ranking", get(get_ranking))
}

// ─── Run Upload ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UploadRunRequest {
    /// Start of the run (Unix epoch milliseconds)
    pub start_time: i64,
    /// End of the run (Unix epoch milliseconds)
    pub end_time: i64,
    /// Raw GPS trace in capture order
    pub points: Vec<GeoPoint>,
}

#[derive(Serialize)]
pub struct UploadRunResponse {
    pub id: String,
    pub distance_m: f64,
    pub duration_ms: i64,
    /// Seconds per kilometer; absent for traces too short to pace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace_s_per_km: Option<f64>,
}

/// Score an uploaded GPS trace and persist the run.
async fn upload_run(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<UploadRunRequest>,
) -> Result<Json<UploadRunResponse>> {
    tracing::debug!(
        user_id = %user.user_id,
        points = body.points.len(),
        "Processing run upload"
    );

    let scored = state
        .run_processor
        .process_upload(&user.user_id, body.start_time, body.end_time, &body.points)
        .await?;

    Ok(Json(UploadRunResponse {
        id: scored.run_id,
        distance_m: scored.distance_m,
        duration_ms: scored.duration_ms,
        pace_s_per_km: scored.pace_s_per_km,
    }))
}

// ─── Run History ─────────────────────────────────────────────

#[derive(Deserialize)]
struct RunsQuery {
    /// Pagination: page number (1-indexed)
    #[serde(default = "default_page")]
    page: u32,
    /// Pagination: items per page
    #[serde(default = "default_per_page")]
    per_page: u32,
}

#[derive(Serialize)]
pub struct RunsResponse {
    pub runs: Vec<RunSummary>,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Serialize, Clone, Debug)]
pub struct RunSummary {
    pub id: String,
    pub start_time: i64,
    pub duration_ms: i64,
    pub distance_m: f64,
}

/// Get the caller's runs, newest first.
async fn get_runs(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<RunsQuery>,
) -> Result<Json<RunsResponse>> {
    if params.page < 1 {
        return Err(crate::error::AppError::BadRequest(
            "Page must be greater than 0".to_string(),
        ));
    }

    let per_page = params.per_page.min(MAX_PER_PAGE);
    let offset = (params.page - 1) * per_page;

    let runs = state
        .db
        .runs_for_user(&user.user_id, per_page, offset)
        .await?;

    let runs = runs
        .into_iter()
        .map(|r| RunSummary {
            id: r.run_id,
            start_time: r.start_time,
            duration_ms: r.duration_ms,
            distance_m: r.distance_m,
        })
        .collect();

    Ok(Json(RunsResponse {
        runs,
        page: params.page,
        per_page,
    }))
}

// ─── Leaderboard ─────────────────────────────────────────────

#[derive(Deserialize)]
struct RankingQuery {
    limit: Option<u32>,
}

#[derive(Serialize)]
pub struct RankingResponse {
    pub ranking: Vec<RankingEntry>,
}

#[derive(Serialize, Clone, Debug)]
pub struct RankingEntry {
    pub name: String,
    pub total_m: f64,
}

/// Global leaderboard: total distance per user, descending.
async fn get_ranking(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RankingQuery>,
) -> Result<Json<RankingResponse>> {
    let limit = params.limit.unwrap_or(DEFAULT_RANKING_LIMIT);

    let stats = state.db.ranking(limit).await?;

    let ranking = stats
        .into_iter()
        .map(|s| RankingEntry {
            name: s.name,
            total_m: s.total_distance_meters,
        })
        .collect();

    Ok(Json(RankingResponse { ranking }))
}
