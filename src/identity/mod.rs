//! Identity service: registration, login, and principal resolution
//!
//! Owns the password hasher, the token signer, and the credential store
//! handle. Every authenticated operation downstream of this module works
//! with a resolved [`User`], never with a raw token.

mod password;
mod token;

pub use password::CredentialHasher;
pub use token::{DEFAULT_TOKEN_TTL_MINUTES, TokenClaims, TokenSigner};

use crate::core::{Role, User};
use crate::error::{Result, SmartTicketError};
use crate::storage::UserStore;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Syntax check for email addresses at the request boundaries
///
/// Used by both the HTTP layer and the CLI before anything touches the
/// credential store.
pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(SmartTicketError::validation(format!(
            "invalid email address: {email}"
        )))
    }
}

/// Admin gate: passes admins through, rejects everyone else
pub fn require_admin(user: &User) -> Result<&User> {
    if user.role.is_admin() {
        Ok(user)
    } else {
        Err(SmartTicketError::AdminRequired)
    }
}

/// Registration, login, and token-to-principal resolution
pub struct IdentityService {
    users: Arc<dyn UserStore>,
    hasher: CredentialHasher,
    signer: TokenSigner,
}

impl IdentityService {
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>, signer: TokenSigner) -> Self {
        Self {
            users,
            hasher: CredentialHasher::new(),
            signer,
        }
    }

    /// Register a new account with the default `user` role
    ///
    /// The store rejects duplicate emails, so a second registration for
    /// the same address surfaces as a conflict.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        company: &str,
    ) -> Result<User> {
        let hash = self.hasher.hash(password)?;
        let user = User::new(name, email, hash, company, Role::User);
        self.users.insert(&user).await?;
        info!(user_id = %user.id, company = %user.company, "registered new user");
        Ok(user)
    }

    /// Provision an administrator account
    ///
    /// Not reachable from the HTTP surface; only the CLI calls this.
    pub async fn create_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
        company: &str,
    ) -> Result<User> {
        let hash = self.hasher.hash(password)?;
        let user = User::new(name, email, hash, company, Role::Admin);
        self.users.insert(&user).await?;
        info!(user_id = %user.id, company = %user.company, "created admin account");
        Ok(user)
    }

    /// Authenticate credentials and issue a session token
    ///
    /// An unknown email and a wrong password fail identically, so the
    /// response never reveals whether an address is registered.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User)> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(SmartTicketError::InvalidCredentials)?;
        if !self.hasher.verify(password, &user.password_hash) {
            return Err(SmartTicketError::InvalidCredentials);
        }
        let token = self.signer.issue(&user)?;
        debug!(user_id = %user.id, "login succeeded");
        Ok((token, user))
    }

    /// Resolve a presented token to the stored account
    ///
    /// Verifies the token, then looks the user up by the embedded email.
    /// A valid token whose account has vanished is an authentication
    /// failure, not a server error. The stored record wins over the
    /// token's role claim, which is never refreshed after issue.
    pub async fn resolve_principal(&self, token: &str) -> Result<User> {
        let claims = self.signer.verify(token)?;
        self.users
            .find_by_email(&claims.email)
            .await?
            .ok_or(SmartTicketError::PrincipalNotFound {
                email: claims.email,
            })
    }
}
