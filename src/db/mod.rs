//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Normalized email -> user ID mapping; document-create semantics
    /// enforce email uniqueness.
    pub const USER_EMAILS: &str = "user_emails";
    pub const RUNS: &str = "runs";
    /// Per-user distance aggregates (keyed by user_id)
    pub const RUNNER_STATS: &str = "runner_stats";
}
