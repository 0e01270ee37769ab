//! Ticket record, projections, and update shapes

use super::{Priority, Status, StatusUpdate, TicketId, Urgency, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category assigned when the reporter leaves the field blank
///
/// Stands in for an automatic classifier; until one exists every
/// uncategorized ticket lands here.
pub const DEFAULT_CATEGORY: &str = "General";

/// A support ticket
///
/// `id` and `owner_id` never change after creation, and `company` is a
/// copy of the owner's tenant tag taken at creation time. `updated_at`
/// advances on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub owner_id: UserId,
    pub company: String,
    pub subject: String,
    pub description: String,
    pub urgency: Urgency,
    /// Free text; no taxonomy is enforced
    pub category: String,
    pub priority: Priority,
    pub status: Status,
    /// Admin-authored guidance, absent until an admin sets it
    pub admin_suggestion: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reporter-supplied fields for a new ticket
///
/// Everything else on [`Ticket`] is generated or defaulted at creation.
#[derive(Debug, Clone)]
pub struct TicketDraft {
    pub subject: String,
    pub description: String,
    pub urgency: Urgency,
    pub category: Option<String>,
}

/// Compact projection used by both list operations
///
/// Deliberately omits description, urgency, company, suggestion, and
/// timestamps; detail views carry those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSummary {
    pub id: TicketId,
    pub subject: String,
    pub category: String,
    pub priority: Priority,
    pub status: Status,
}

impl From<&Ticket> for TicketSummary {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id.clone(),
            subject: ticket.subject.clone(),
            category: ticket.category.clone(),
            priority: ticket.priority,
            status: ticket.status,
        }
    }
}

/// Admin-update input: absent fields leave the ticket untouched
///
/// Status uses the request vocabulary ([`StatusUpdate`]), which still
/// carries the `pending` alias. [`Self::into_patch`] normalizes it.
#[derive(Debug, Clone, Default)]
pub struct TicketUpdate {
    pub priority: Option<Priority>,
    pub status: Option<StatusUpdate>,
    pub urgency: Option<Urgency>,
    pub admin_suggestion: Option<String>,
}

impl TicketUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.priority.is_none()
            && self.status.is_none()
            && self.urgency.is_none()
            && self.admin_suggestion.is_none()
    }

    /// Convert to the store-facing patch, folding status aliases onto
    /// the canonical vocabulary
    #[must_use]
    pub fn into_patch(self) -> TicketPatch {
        TicketPatch {
            priority: self.priority,
            status: self.status.map(StatusUpdate::canonical),
            urgency: self.urgency,
            admin_suggestion: self.admin_suggestion,
        }
    }
}

/// Store-facing sparse patch with canonical status values only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPatch {
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub urgency: Option<Urgency>,
    pub admin_suggestion: Option<String>,
}

impl TicketPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.priority.is_none()
            && self.status.is_none()
            && self.urgency.is_none()
            && self.admin_suggestion.is_none()
    }

    /// Apply the present fields to a ticket, leaving absent ones alone
    ///
    /// Timestamp stamping is the store's job, not the patch's.
    pub fn apply(&self, ticket: &mut Ticket) {
        if let Some(priority) = self.priority {
            ticket.priority = priority;
        }
        if let Some(status) = self.status {
            ticket.status = status;
        }
        if let Some(urgency) = self.urgency {
            ticket.urgency = urgency;
        }
        if let Some(ref suggestion) = self.admin_suggestion {
            ticket.admin_suggestion = Some(suggestion.clone());
        }
    }
}
