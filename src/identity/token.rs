//! Session token issuing and verification
//!
//! Tokens are HS256-signed JWTs carrying the user's id, email, and role
//! plus an absolute expiry. They are the sole session mechanism: nothing
//! is persisted server-side and there is no revocation list, so a token
//! stays usable until its expiry even if the account's stored role
//! changes underneath it.

use crate::core::{Role, User};
use crate::error::{Result, SmartTicketError};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Token lifetime when the configuration does not override it
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// Claims embedded in every session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id as a string
    pub sub: String,
    /// Login email; principal resolution keys on this
    pub email: String,
    /// Role at issue time; informational, since authorization re-reads
    /// the stored record
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies session tokens with one shared secret
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    /// Create a signer from the shared secret and a lifetime in minutes
    #[must_use]
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Issue a token for a user, expiring one TTL from now
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Verify a presented token and return its claims
    ///
    /// Expiry and every other failure mode map to distinct variants so
    /// logs can tell them apart; the API surfaces both as the same
    /// unauthorized response.
    pub fn verify(&self, token: &str) -> Result<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        match decode::<TokenClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(SmartTicketError::TokenExpired),
                _ => Err(SmartTicketError::InvalidToken),
            },
        }
    }
}
