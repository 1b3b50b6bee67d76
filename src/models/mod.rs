// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod run;
pub mod stats;
pub mod user;

pub use run::{GeoPoint, Run};
pub use stats::RunnerStats;
pub use user::{PasswordHashRecord, User};
