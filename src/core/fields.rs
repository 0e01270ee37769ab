//! Enumerated vocabulary for users and tickets
//!
//! Wire casings differ by field and are fixed by the API contract:
//! urgency is lowercase, priority is capitalized, status is snake_case.
//! All enums use strict serde, so an out-of-vocabulary value in a request
//! body or a stored document fails deserialization instead of passing
//! through as free text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Access role of a user
///
/// Closed set: anything other than `user` or `admin` is rejected at the
/// store boundary when a record is read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular end user, the default for every registration
    #[default]
    User,
    /// Administrator with triage access to all tickets
    Admin,
}

impl Role {
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reporter-declared urgency of a ticket
///
/// Independent of [`Priority`]: admins set priority by hand and it is
/// never derived from this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Urgency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Admin-assigned triage priority
///
/// Serialized capitalized (`"Medium"`), unlike urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status as persisted
///
/// Only these three values ever reach a store. Transitions are
/// unconstrained: an admin may move a ticket between any two statuses,
/// including reopening a resolved one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Resolved,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status vocabulary accepted in admin update requests
///
/// Superset of [`Status`] with the legacy alias `pending`, which some
/// clients still send for an in-progress ticket. [`Self::canonical`]
/// folds the alias away, so `pending` never reaches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusUpdate {
    Open,
    InProgress,
    Pending,
    Resolved,
}

impl StatusUpdate {
    /// Collapse the input vocabulary onto the stored one
    #[must_use]
    pub const fn canonical(self) -> Status {
        match self {
            Self::Open => Status::Open,
            Self::InProgress | Self::Pending => Status::InProgress,
            Self::Resolved => Status::Resolved,
        }
    }
}
