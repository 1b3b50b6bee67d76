//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Random UUID (also used as document ID)
    pub user_id: String,
    /// Email address, lowercased before storage
    pub email: String,
    /// Display name
    pub name: String,
    /// Password hash record (algorithm-tagged)
    pub password: PasswordHashRecord,
    /// When the account was created (ISO 8601)
    pub created_at: String,
}

/// A stored password hash, tagged with the algorithm that produced it.
///
/// Records written by different generations of the app coexist in the
/// `users` collection, so verification must dispatch on the tag rather
/// than assume the current scheme. New registrations always write
/// `pbkdf2_sha256`; the bcrypt variants are read-only legacy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum PasswordHashRecord {
    /// PBKDF2-HMAC-SHA256 with a per-user random salt.
    Pbkdf2Sha256 {
        /// Hex-encoded 16-byte salt
        salt: String,
        /// HMAC iteration count used at derivation time
        iterations: u32,
        /// Hex-encoded 32-byte derived key
        hash: String,
    },
    /// bcrypt over the SHA-256 hex digest of the password.
    ///
    /// An older scheme that pre-hashed to sidestep bcrypt's 72-byte
    /// input limit.
    BcryptSha256 {
        /// Modular-crypt bcrypt string ($2b$...)
        hash: String,
    },
    /// Plain bcrypt, the oldest scheme.
    Bcrypt {
        /// Modular-crypt bcrypt string ($2b$...)
        hash: String,
    },
}
