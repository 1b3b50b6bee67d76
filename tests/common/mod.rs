// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use corrida_tracker::config::Config;
use corrida_tracker::db::FirestoreDb;
use corrida_tracker::routes::create_router;
use corrida_tracker::services::RunProcessor;
use corrida_tracker::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
///
/// Every storage call on it fails, which is exactly what tests of the
/// validation and auth layers want: anything that reaches the database
/// surfaces as a 500 instead of a false pass.
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let db = test_db_offline();
    let run_processor = RunProcessor::new(db.clone());

    let state = Arc::new(AppState {
        config,
        db,
        run_processor,
    });

    (create_router(state.clone()), state)
}

/// Create a valid session token for tests.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    corrida_tracker::middleware::auth::create_jwt(user_id, signing_key)
        .expect("Failed to create test JWT")
}
