// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing and verification.
//!
//! New registrations always derive PBKDF2-HMAC-SHA256 records.
//! Verification dispatches on the algorithm tag stored with each
//! record, because rows written by older generations of the app are
//! still live: plain bcrypt, and a bcrypt variant that pre-hashes the
//! password with SHA-256 to sidestep bcrypt's 72-byte input limit.

use std::num::NonZeroU32;

use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};
use sha2::{Digest, Sha256};

use crate::models::PasswordHashRecord;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// PBKDF2 iteration count for newly derived records.
pub const PBKDF2_ITERATIONS: u32 = 210_000;

const SALT_LEN: usize = 16;
const KEY_LEN: usize = digest::SHA256_OUTPUT_LEN; // 32 bytes

/// Derive a fresh hash record for a new password.
///
/// Enforces the minimum-length policy before touching the KDF.
pub fn derive(password: &str) -> Result<PasswordHashRecord, PasswordError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PasswordError::WeakPassword(MIN_PASSWORD_LEN));
    }

    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| PasswordError::Rng)?;

    let iterations = NonZeroU32::new(PBKDF2_ITERATIONS).expect("iteration count is non-zero");
    let mut key = [0u8; KEY_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        &salt,
        password.as_bytes(),
        &mut key,
    );

    Ok(PasswordHashRecord::Pbkdf2Sha256 {
        salt: hex::encode(salt),
        iterations: PBKDF2_ITERATIONS,
        hash: hex::encode(key),
    })
}

/// Check a password against a stored record.
///
/// Digest comparisons are constant-time: `ring::pbkdf2::verify` for the
/// current scheme, bcrypt's internal comparison for the legacy ones. A
/// corrupt record (bad hex, zero iterations) verifies as false rather
/// than erroring, so login keeps its uniform failure shape.
pub fn verify(password: &str, record: &PasswordHashRecord) -> bool {
    match record {
        PasswordHashRecord::Pbkdf2Sha256 {
            salt,
            iterations,
            hash,
        } => {
            let (Ok(salt), Ok(expected)) = (hex::decode(salt), hex::decode(hash)) else {
                return false;
            };
            let Some(iterations) = NonZeroU32::new(*iterations) else {
                return false;
            };
            pbkdf2::verify(
                pbkdf2::PBKDF2_HMAC_SHA256,
                iterations,
                &salt,
                password.as_bytes(),
                &expected,
            )
            .is_ok()
        }
        PasswordHashRecord::BcryptSha256 { hash } => {
            let digest = hex::encode(Sha256::digest(password.as_bytes()));
            bcrypt::verify(&digest, hash).unwrap_or(false)
        }
        PasswordHashRecord::Bcrypt { hash } => bcrypt::verify(password, hash).unwrap_or(false),
    }
}

/// Errors from password derivation.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("System random generator unavailable")]
    Rng,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_then_verify_round_trip() {
        let record = derive("correct horse").unwrap();
        assert!(verify("correct horse", &record));
        assert!(!verify("wrong horse", &record));
    }

    #[test]
    fn test_derive_writes_current_scheme() {
        let record = derive("hunter22").unwrap();
        match record {
            PasswordHashRecord::Pbkdf2Sha256 {
                salt,
                iterations,
                hash,
            } => {
                assert_eq!(salt.len(), SALT_LEN * 2);
                assert_eq!(iterations, PBKDF2_ITERATIONS);
                assert_eq!(hash.len(), KEY_LEN * 2);
            }
            other => panic!("expected pbkdf2_sha256 record, got {:?}", other),
        }
    }

    #[test]
    fn test_derive_salts_are_unique() {
        let a = derive("hunter22").unwrap();
        let b = derive("hunter22").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_weak_password_rejected_before_derivation() {
        let err = derive("short").unwrap_err();
        assert!(matches!(err, PasswordError::WeakPassword(MIN_PASSWORD_LEN)));
    }

    #[test]
    fn test_verify_legacy_bcrypt_record() {
        let hash = bcrypt::hash("legacy-password", 4).unwrap();
        let record = PasswordHashRecord::Bcrypt { hash };

        assert!(verify("legacy-password", &record));
        assert!(!verify("other-password", &record));
    }

    #[test]
    fn test_verify_legacy_bcrypt_sha256_record() {
        // Written by the generation that pre-hashed before bcrypt
        let digest = hex::encode(Sha256::digest(b"legacy-password"));
        let hash = bcrypt::hash(&digest, 4).unwrap();
        let record = PasswordHashRecord::BcryptSha256 { hash };

        assert!(verify("legacy-password", &record));
        assert!(!verify("other-password", &record));
    }

    #[test]
    fn test_bcrypt_sha256_accepts_passwords_beyond_72_bytes() {
        // The pre-hash collapses any length to 64 hex chars, so long
        // passwords verify exactly instead of being truncated
        let long = "x".repeat(100);
        let digest = hex::encode(Sha256::digest(long.as_bytes()));
        let hash = bcrypt::hash(&digest, 4).unwrap();
        let record = PasswordHashRecord::BcryptSha256 { hash };

        assert!(verify(&long, &record));
        assert!(!verify(&"x".repeat(99), &record));
    }

    #[test]
    fn test_corrupt_record_verifies_false() {
        let record = PasswordHashRecord::Pbkdf2Sha256 {
            salt: "not hex".to_string(),
            iterations: PBKDF2_ITERATIONS,
            hash: "ff".repeat(32),
        };
        assert!(!verify("anything", &record));
    }
}
