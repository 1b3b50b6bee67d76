// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Run model for storage and API.

use serde::{Deserialize, Serialize};

/// Stored run record in Firestore.
///
/// Runs are written once at upload and never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// Random UUID (also used as document ID)
    pub run_id: String,
    /// Owning user's ID
    pub user_id: String,
    /// Start of the run (Unix epoch milliseconds)
    pub start_time: i64,
    /// Duration in milliseconds (end - start, clamped to >= 0)
    pub duration_ms: i64,
    /// Total distance in meters
    pub distance_m: f64,
    /// When this run was processed (ISO 8601)
    pub created_at: String,
}

/// A single GPS sample from an uploaded trace.
///
/// Points only exist during upload processing; they are never persisted
/// individually.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
    /// Reported horizontal accuracy in meters, if the device provided one
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// Capture timestamp (Unix epoch milliseconds), if provided
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            accuracy: None,
            timestamp: None,
        }
    }
}
