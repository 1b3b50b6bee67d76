// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile + password record storage, email uniqueness)
//! - Runs (insert-only run ledger)
//! - Runner stats (per-user distance aggregates for the leaderboard)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Run, RunnerStats, User};
use serde::{Deserialize, Serialize};

/// Normalized email -> user ID mapping document.
///
/// Firestore has no unique-column constraint, so uniqueness rides on
/// the create-only insert of this document, keyed by the email itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmailIndexEntry {
    user_id: String,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Look up a user by normalized email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let entry: Option<EmailIndexEntry> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USER_EMAILS)
            .obj()
            .one(email)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        match entry {
            Some(entry) => self.get_user(&entry.user_id).await,
            None => Ok(None),
        }
    }

    /// Create a new user, enforcing email uniqueness.
    ///
    /// The email mapping document is created first with create-only
    /// semantics; a conflict there means the address is taken. The
    /// profile write follows, with a best-effort rollback of the
    /// mapping if it fails.
    pub async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let client = self.get_client()?;

        let entry = EmailIndexEntry {
            user_id: user.user_id.clone(),
        };

        let _: EmailIndexEntry = client
            .fluent()
            .insert()
            .into(collections::USER_EMAILS)
            .document_id(&user.email)
            .object(&entry)
            .execute()
            .await
            .map_err(|e| match e {
                firestore::errors::FirestoreError::DataConflictError(_) => AppError::EmailTaken,
                other => AppError::Database(other.to_string()),
            })?;

        let profile_write: Result<(), _> = client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.user_id)
            .object(user)
            .execute()
            .await;

        if let Err(e) = profile_write {
            // Roll back the mapping so the address is not burned
            if let Err(cleanup) = client
                .fluent()
                .delete()
                .from(collections::USER_EMAILS)
                .document_id(&user.email)
                .execute()
                .await
            {
                tracing::error!(
                    email = %user.email,
                    error = %cleanup,
                    "Failed to roll back email mapping after profile write failure"
                );
            }
            return Err(AppError::Database(e.to_string()));
        }

        Ok(())
    }

    // ─── Run Operations ──────────────────────────────────────────

    /// Get runs for a user, newest start time first, with pagination.
    pub async fn runs_for_user(
        &self,
        user_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Run>, AppError> {
        let user_id = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::RUNS)
            .filter(move |q| q.field("user_id").eq(user_id.clone()))
            .order_by([(
                "start_time",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .offset(offset)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Atomically insert a run and fold it into the owner's stats.
    ///
    /// Uses a Firestore transaction so the run document and the
    /// `runner_stats` aggregate are written together; concurrent
    /// inserts for the same user retry with fresh data instead of
    /// losing updates.
    pub async fn insert_run_atomic(&self, run: &Run, owner_name: &str) -> Result<(), AppError> {
        let client = self.get_client()?;
        let now = chrono::Utc::now().to_rfc3339();

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        // Read current stats; registers the doc for conflict detection
        let current_stats: Option<RunnerStats> = client
            .fluent()
            .select()
            .by_id_in(collections::RUNNER_STATS)
            .obj()
            .one(&run.user_id)
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to read stats in transaction: {}", e))
            })?;

        let mut stats =
            current_stats.unwrap_or_else(|| RunnerStats::empty(&run.user_id, owner_name));
        // Keep the denormalized name current
        stats.name = owner_name.to_string();
        stats.update_from_run(run, &now);

        client
            .fluent()
            .update()
            .in_col(collections::RUNS)
            .document_id(&run.run_id)
            .object(run)
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(format!("Failed to add run to transaction: {}", e)))?;

        client
            .fluent()
            .update()
            .in_col(collections::RUNNER_STATS)
            .document_id(&run.user_id)
            .object(&stats)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add stats to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            user_id = %run.user_id,
            run_id = %run.run_id,
            distance_m = run.distance_m,
            "Run inserted atomically"
        );

        Ok(())
    }

    // ─── Leaderboard ─────────────────────────────────────────────

    /// Top runners by total distance, descending, truncated to `limit`.
    ///
    /// Ties order by user ID ascending; the secondary key is applied
    /// in memory so the result is deterministic regardless of the
    /// store's document order.
    pub async fn ranking(&self, limit: u32) -> Result<Vec<RunnerStats>, AppError> {
        let mut stats: Vec<RunnerStats> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::RUNNER_STATS)
            .order_by([(
                "total_distance_meters",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        stats.sort_by(|a, b| {
            b.total_distance_meters
                .partial_cmp(&a.total_distance_meters)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        Ok(stats)
    }
}
