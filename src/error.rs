//! Error types for smart-ticket
//!
//! A single crate-wide error enum covers the whole failure taxonomy:
//! validation rejections, authentication and authorization failures,
//! missing resources, and dependency failures from storage or signing.
//! Each variant knows its HTTP status and the body the API may expose.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Result type alias using `SmartTicketError`
pub type Result<T> = std::result::Result<T, SmartTicketError>;

/// All errors that can occur in smart-ticket
#[derive(Error, Debug)]
pub enum SmartTicketError {
    /// Request input failed shape or vocabulary checks before reaching a store
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// Registration attempted with an email that already has an account
    #[error("email already registered: {email}")]
    EmailTaken { email: String },

    /// Login failed; unknown email and wrong password are deliberately
    /// collapsed into this one variant
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Token is malformed, carries a bad signature, or is otherwise unusable
    #[error("invalid authentication token")]
    InvalidToken,

    /// Token was valid once but its expiry has passed
    #[error("authentication token expired")]
    TokenExpired,

    /// Token verified but no account exists for the embedded email
    #[error("no account for authenticated principal: {email}")]
    PrincipalNotFound { email: String },

    /// Caller is authenticated but lacks the admin role
    #[error("admin access required")]
    AdminRequired,

    /// Caller is neither the ticket owner nor an admin
    #[error("not authorized to view ticket: {id}")]
    TicketAccessDenied { id: String },

    /// No ticket exists for the given id
    #[error("ticket not found: {id}")]
    TicketNotFound { id: String },

    /// Admin update carried no fields; reported to callers exactly like
    /// `TicketNotFound` but kept distinct for logs and tests
    #[error("empty update: no fields to apply")]
    EmptyPatch,

    /// Password hashing or credential parsing failed inside the hasher
    #[error("password hashing failed: {message}")]
    PasswordHash { message: String },

    /// Token could not be signed
    #[error("token signing failed: {0}")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization or deserialization failed
    #[error("serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration loading failed
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl SmartTicketError {
    /// Create a validation error with a custom message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// HTTP status this error maps to
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::EmailTaken { .. } => StatusCode::CONFLICT,
            Self::InvalidCredentials
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::PrincipalNotFound { .. } => StatusCode::UNAUTHORIZED,
            Self::AdminRequired | Self::TicketAccessDenied { .. } => StatusCode::FORBIDDEN,
            Self::TicketNotFound { .. } | Self::EmptyPatch => StatusCode::NOT_FOUND,
            Self::PasswordHash { .. }
            | Self::TokenSigning(_)
            | Self::Io(_)
            | Self::Yaml(_)
            | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body text safe to expose to API callers
    ///
    /// Token failures share one message so expired, malformed, and
    /// orphaned tokens are indistinguishable from outside, and an empty
    /// patch reads exactly like a missing ticket.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::EmailTaken { .. } => "Email already registered".to_string(),
            Self::InvalidCredentials => "Invalid email or password".to_string(),
            Self::InvalidToken | Self::TokenExpired | Self::PrincipalNotFound { .. } => {
                "Invalid or expired token".to_string()
            },
            Self::AdminRequired => "Admin access required".to_string(),
            Self::TicketAccessDenied { .. } => "Not authorized to view this ticket".to_string(),
            Self::TicketNotFound { .. } | Self::EmptyPatch => "Ticket not found".to_string(),
            _ => "Internal server error".to_string(),
        }
    }

    /// Whether the error was caused by the caller rather than a dependency
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(
            self,
            Self::PasswordHash { .. }
                | Self::TokenSigning(_)
                | Self::Io(_)
                | Self::Yaml(_)
                | Self::Config(_)
        )
    }
}

impl IntoResponse for SmartTicketError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_client_error() {
            debug!(status = %status, error = %self, "request rejected");
        } else {
            error!(status = %status, error = %self, "request failed");
        }
        (status, Json(json!({ "detail": self.public_message() }))).into_response()
    }
}
