//! Test utilities for smart-ticket
//!
//! Shared fixtures for unit tests across the crate. Accounts built here
//! carry a placeholder credential so tests that never exercise login
//! skip the cost of real password hashing.

#![cfg(test)]

use crate::core::{Role, User};

/// Signing secret used by unit tests that mint tokens
pub const TEST_JWT_SECRET: &str = "test-signing-secret-0123456789abcdef0123456789";

/// Build a regular account without hashing a password
pub fn test_user(name: &str, email: &str, company: &str) -> User {
    User::new(name, email, "unhashed-test-credential", company, Role::User)
}

/// Build an admin account without hashing a password
pub fn test_admin(name: &str, email: &str, company: &str) -> User {
    User::new(name, email, "unhashed-test-credential", company, Role::Admin)
}
