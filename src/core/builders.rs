use super::{DEFAULT_CATEGORY, Priority, Status, Ticket, TicketId, Urgency, UserId};
use chrono::{DateTime, Utc};

/// Builder for creating Ticket instances
///
/// `build` fills every field the caller left unset with the creation
/// defaults: a fresh id, category "General", priority Medium, status
/// open, no suggestion, and both timestamps equal to now.
#[derive(Default)]
pub struct TicketBuilder {
    id: Option<TicketId>,
    owner_id: Option<UserId>,
    company: Option<String>,
    subject: Option<String>,
    description: Option<String>,
    urgency: Option<Urgency>,
    category: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
    admin_suggestion: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticket ID
    #[must_use]
    pub fn id(mut self, id: TicketId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the owning user
    #[must_use]
    pub fn owner_id(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Set the tenant tag
    #[must_use]
    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Set the subject
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the urgency
    #[must_use]
    pub const fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    /// Set the category
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the priority
    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the status
    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the admin suggestion
    #[must_use]
    pub fn admin_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.admin_suggestion = Some(suggestion.into());
        self
    }

    /// Set `created_at` timestamp
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set `updated_at` timestamp
    #[must_use]
    pub const fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Build the ticket
    pub fn build(self) -> Ticket {
        let created_at = self.created_at.unwrap_or_else(Utc::now);
        Ticket {
            id: self.id.unwrap_or_default(),
            owner_id: self.owner_id.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            subject: self.subject.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            urgency: self.urgency.unwrap_or_default(),
            category: self
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            admin_suggestion: self.admin_suggestion,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        }
    }
}
