//! Request and response bodies for the HTTP surface
//!
//! Wire names are camelCase to match the JSON the frontend already
//! speaks. Request types carry their own boundary checks; the engine
//! and identity layers receive only validated, strongly typed input.

use crate::config::Config;
use crate::core::{
    Priority, Role, Status, StatusUpdate, Ticket, TicketDraft, TicketId, TicketSummary,
    TicketUpdate, Urgency, User, UserId,
};
use crate::error::{Result, SmartTicketError};
use crate::identity::validate_email;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub company: String,
}

impl RegisterRequest {
    /// Shape and vocabulary checks, run before the credential store is touched
    pub fn validate(&self, config: &Config) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SmartTicketError::validation("name must not be empty"));
        }
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(SmartTicketError::validation("password must not be empty"));
        }
        if !config.is_known_tenant(&self.company) {
            return Err(SmartTicketError::validation(format!(
                "unknown company: {}",
                self.company
            )));
        }
        Ok(())
    }
}

/// Body of `POST /auth/login`
///
/// Not validated beyond deserialization: a malformed email can never
/// match an account, and the credential check already answers with the
/// uniform login failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /tickets`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    pub subject: String,
    pub description: String,
    pub urgency: Urgency,
    #[serde(default)]
    pub category: Option<String>,
}

impl CreateTicketRequest {
    pub fn validate(&self) -> Result<()> {
        if self.subject.trim().is_empty() {
            return Err(SmartTicketError::validation("subject must not be empty"));
        }
        if self.description.trim().is_empty() {
            return Err(SmartTicketError::validation(
                "description must not be empty",
            ));
        }
        Ok(())
    }

    /// Convert to the engine's input shape
    ///
    /// A blank category counts as not supplied, so it falls back to the
    /// default at creation.
    #[must_use]
    pub fn into_draft(self) -> TicketDraft {
        TicketDraft {
            subject: self.subject,
            description: self.description,
            urgency: self.urgency,
            category: self.category.filter(|c| !c.trim().is_empty()),
        }
    }
}

/// Body of `PATCH /tickets/:id/admin-update`; every field optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminUpdateRequest {
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<StatusUpdate>,
    #[serde(default)]
    pub urgency: Option<Urgency>,
    #[serde(default, rename = "adminSuggestion")]
    pub admin_suggestion: Option<String>,
}

impl From<AdminUpdateRequest> for TicketUpdate {
    fn from(request: AdminUpdateRequest) -> Self {
        Self {
            priority: request.priority,
            status: request.status,
            urgency: request.urgency,
            admin_suggestion: request.admin_suggestion,
        }
    }
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Account fields exposed after login; never includes the credential
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Body of `POST /auth/login` on success
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

/// One entry in a ticket listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSummaryResponse {
    pub ticket_id: TicketId,
    pub subject: String,
    pub category: String,
    pub priority: Priority,
    pub status: Status,
}

impl From<TicketSummary> for TicketSummaryResponse {
    fn from(summary: TicketSummary) -> Self {
        Self {
            ticket_id: summary.id,
            subject: summary.subject,
            category: summary.category,
            priority: summary.priority,
            status: summary.status,
        }
    }
}

/// Full ticket view returned by create, detail, and admin update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetailResponse {
    pub ticket_id: TicketId,
    pub user_id: UserId,
    pub company: String,
    pub subject: String,
    pub description: String,
    pub urgency: Urgency,
    pub category: String,
    pub priority: Priority,
    pub status: Status,
    pub admin_suggestion: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Ticket> for TicketDetailResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            ticket_id: ticket.id,
            user_id: ticket.owner_id,
            company: ticket.company,
            subject: ticket.subject,
            description: ticket.description,
            urgency: ticket.urgency,
            category: ticket.category,
            priority: ticket.priority,
            status: ticket.status,
            admin_suggestion: ticket.admin_suggestion,
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TicketBuilder;

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            name: "Ann".to_string(),
            email: "ann@companya.example".to_string(),
            password: "pw-123456".to_string(),
            company: "CompanyA".to_string(),
        }
    }

    #[test]
    fn test_register_validation() {
        let config = Config::default();
        assert!(register_request().validate(&config).is_ok());

        let mut blank_name = register_request();
        blank_name.name = "   ".to_string();
        assert!(blank_name.validate(&config).is_err());

        let mut bad_email = register_request();
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate(&config).is_err());

        let mut no_password = register_request();
        no_password.password = String::new();
        assert!(no_password.validate(&config).is_err());

        let mut unknown_company = register_request();
        unknown_company.company = "CompanyZ".to_string();
        let err = unknown_company.validate(&config).unwrap_err();
        assert!(matches!(err, SmartTicketError::Validation { .. }));
    }

    #[test]
    fn test_create_ticket_validation() {
        let request = CreateTicketRequest {
            subject: "Printer jam".to_string(),
            description: "Tray 2 again".to_string(),
            urgency: Urgency::Low,
            category: None,
        };
        assert!(request.validate().is_ok());

        let mut blank_subject = request.clone();
        blank_subject.subject = " ".to_string();
        assert!(blank_subject.validate().is_err());

        let mut blank_description = request;
        blank_description.description = String::new();
        assert!(blank_description.validate().is_err());
    }

    #[test]
    fn test_blank_category_counts_as_unset() {
        let request = CreateTicketRequest {
            subject: "s".to_string(),
            description: "d".to_string(),
            urgency: Urgency::Medium,
            category: Some("  ".to_string()),
        };
        assert_eq!(request.into_draft().category, None);

        let request = CreateTicketRequest {
            subject: "s".to_string(),
            description: "d".to_string(),
            urgency: Urgency::Medium,
            category: Some("Network".to_string()),
        };
        assert_eq!(request.into_draft().category.as_deref(), Some("Network"));
    }

    #[test]
    fn test_admin_update_wire_names() {
        let request: AdminUpdateRequest = serde_json::from_str(
            r#"{"priority": "High", "status": "pending", "adminSuggestion": "restart it"}"#,
        )
        .unwrap();

        assert_eq!(request.priority, Some(Priority::High));
        assert_eq!(request.status, Some(StatusUpdate::Pending));
        assert_eq!(request.urgency, None);
        assert_eq!(request.admin_suggestion.as_deref(), Some("restart it"));

        let update = TicketUpdate::from(request);
        assert_eq!(update.into_patch().status, Some(Status::InProgress));
    }

    #[test]
    fn test_detail_response_uses_camel_case() {
        let ticket = TicketBuilder::new()
            .owner_id(UserId::new())
            .company("CompanyC")
            .subject("Lost badge")
            .description("Left it on the train")
            .urgency(Urgency::Low)
            .build();

        let body = serde_json::to_value(TicketDetailResponse::from(ticket)).unwrap();
        for key in [
            "ticketId",
            "userId",
            "company",
            "subject",
            "description",
            "urgency",
            "category",
            "priority",
            "status",
            "adminSuggestion",
            "createdAt",
            "updatedAt",
        ] {
            assert!(body.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(body["priority"], "Medium");
        assert_eq!(body["status"], "open");
        assert_eq!(body["urgency"], "low");
    }

    #[test]
    fn test_summary_response_shape() {
        let ticket = TicketBuilder::new()
            .subject("Broken chair")
            .category("Facilities")
            .build();
        let summary = TicketSummaryResponse::from(TicketSummary::from(&ticket));

        let body = serde_json::to_value(summary).unwrap();
        assert_eq!(body["ticketId"], ticket.id.to_string());
        assert_eq!(body["subject"], "Broken chair");
        assert_eq!(body["category"], "Facilities");
        assert!(body.get("description").is_none());
        assert!(body.get("urgency").is_none());
    }
}
