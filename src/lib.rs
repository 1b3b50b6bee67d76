// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Corrida-Tracker: run tracking with a distance leaderboard
//!
//! This crate provides the backend API for registering runners,
//! scoring uploaded GPS traces, and ranking users by total distance.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::RunProcessor;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub run_processor: RunProcessor,
}
