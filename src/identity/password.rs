//! Password hashing built on argon2id
//!
//! Each hash call draws a fresh random salt, so hashing the same
//! password twice yields two different credentials that both verify.

use crate::error::{Result, SmartTicketError};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::debug;

/// One-way credential hasher for login passwords
#[derive(Default)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a plaintext password into a PHC-format credential string
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| SmartTicketError::PasswordHash {
                message: e.to_string(),
            })?;
        Ok(hash.to_string())
    }

    /// Check a plaintext password against a stored credential
    ///
    /// Never fails: a mismatched password, a malformed credential, and
    /// any internal verifier error all come back as `false`, so a
    /// corrupt stored record cannot crash a login attempt.
    #[must_use]
    pub fn verify(&self, password: &str, credential: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(credential) else {
            debug!("stored credential is not a valid hash, rejecting login");
            return false;
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
