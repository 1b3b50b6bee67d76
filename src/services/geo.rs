// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GPS trace filtering and distance scoring.

use crate::models::GeoPoint;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Samples reporting worse accuracy than this are discarded.
pub const ACCURACY_THRESHOLD_M: f64 = 60.0;

/// Pace is undefined below this distance; short traces are mostly noise.
pub const MIN_PACE_DISTANCE_M: f64 = 50.0;

/// Great-circle distance between two points (haversine).
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lng - a.lng).to_radians();
    let x = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * x.sqrt().asin()
}

/// Drop samples whose reported accuracy exceeds the threshold.
///
/// Order-preserving and lazy; points without an accuracy reading are
/// kept.
pub fn filter_accurate(points: &[GeoPoint]) -> impl Iterator<Item = &GeoPoint> {
    points
        .iter()
        .filter(|p| p.accuracy.is_none_or(|a| a <= ACCURACY_THRESHOLD_M))
}

/// Total distance over the accuracy-filtered trace, in meters.
///
/// Sums pairwise consecutive haversine distances. Fails if fewer than
/// two points survive filtering.
pub fn total_distance(points: &[GeoPoint]) -> Result<f64, GeoError> {
    let mut filtered = filter_accurate(points);

    let Some(first) = filtered.next() else {
        return Err(GeoError::InsufficientPoints);
    };

    let mut prev = first;
    let mut total = 0.0;
    let mut count = 1usize;
    for point in filtered {
        total += haversine_distance(prev, point);
        prev = point;
        count += 1;
    }

    if count < 2 {
        return Err(GeoError::InsufficientPoints);
    }

    Ok(total)
}

/// Pace in seconds per kilometer, or `None` when the distance is too
/// short to be meaningful.
pub fn pace_seconds_per_km(duration_ms: i64, distance_m: f64) -> Option<f64> {
    if distance_m < MIN_PACE_DISTANCE_M {
        return None;
    }
    Some((duration_ms as f64 / 1000.0) / (distance_m / 1000.0))
}

/// Errors from trace scoring.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GeoError {
    #[error("Fewer than 2 usable points after accuracy filtering")]
    InsufficientPoints,
}
