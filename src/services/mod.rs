// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod geo;
pub mod password;
pub mod runs;

pub use runs::RunProcessor;
