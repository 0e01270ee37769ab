//! smart-ticket - A multi-tenant support ticketing backend
//!
//! This crate provides a small ticketing service with:
//! - Registration and login with salted password hashing
//! - Signed, time-limited bearer tokens for every authenticated call
//! - Owner-or-admin visibility rules on tickets
//! - Admin triage via sparse patches (priority, status, urgency, suggestion)
//! - Pluggable storage behind async store traits, with in-memory and
//!   file-backed implementations
//!
//! The engine and identity layers hold all the rules; the HTTP surface
//! and CLI are thin shells over them.

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
// Allow some pedantic lints that don't improve code quality
#![allow(clippy::option_if_let_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::single_match_else)]
#![allow(clippy::map_unwrap_or)]

pub mod api;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod identity;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, SmartTicketError};
