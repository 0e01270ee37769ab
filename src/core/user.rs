//! User account record

use super::{Role, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account
///
/// Created once at registration and immutable afterwards; there is no
/// profile-update or delete path. The email doubles as the login key and
/// is unique across the credential store. `password_hash` holds the
/// salted argon2 credential, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    /// Tenant tag, copied onto every ticket the user files
    pub company: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new account record with a generated id
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        company: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            company: company.into(),
            role,
            created_at: Utc::now(),
        }
    }
}
