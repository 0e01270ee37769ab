//! Ticket operations: creation, listing, detail access, admin updates
//!
//! The engine owns the authorization rules around tickets. It receives
//! resolved principals from the identity layer and talks to the store
//! through the [`TicketStore`] trait, so every rule here is enforced the
//! same way over any backend.

use crate::core::{Ticket, TicketBuilder, TicketDraft, TicketId, TicketSummary, TicketUpdate, User};
use crate::error::{Result, SmartTicketError};
use crate::identity::require_admin;
use crate::storage::TicketStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// Ticket lifecycle operations over a pluggable store
pub struct TicketEngine {
    tickets: Arc<dyn TicketStore>,
}

impl TicketEngine {
    #[must_use]
    pub fn new(tickets: Arc<dyn TicketStore>) -> Self {
        Self { tickets }
    }

    /// Create a ticket owned by `owner`
    ///
    /// The company tag is copied from the owner, never taken from the
    /// request. Unset fields get the creation defaults: category
    /// "General", priority medium, status open.
    pub async fn create_ticket(&self, owner: &User, draft: TicketDraft) -> Result<Ticket> {
        let mut builder = TicketBuilder::new()
            .owner_id(owner.id.clone())
            .company(&owner.company)
            .subject(draft.subject)
            .description(draft.description)
            .urgency(draft.urgency);
        if let Some(category) = draft.category {
            builder = builder.category(category);
        }
        let ticket = builder.build();

        self.tickets.insert(&ticket).await?;
        info!(ticket_id = %ticket.id, owner_id = %owner.id, "created ticket");
        Ok(ticket)
    }

    /// Summaries of the caller's own tickets, newest first
    pub async fn list_for_owner(&self, owner: &User) -> Result<Vec<TicketSummary>> {
        let tickets = self.tickets.find_by_owner(&owner.id).await?;
        Ok(tickets.iter().map(TicketSummary::from).collect())
    }

    /// Summaries of every ticket in the system, newest first
    ///
    /// Admin only; the list crosses company boundaries.
    pub async fn list_all(&self, requester: &User) -> Result<Vec<TicketSummary>> {
        require_admin(requester)?;
        let tickets = self.tickets.find_all().await?;
        Ok(tickets.iter().map(TicketSummary::from).collect())
    }

    /// Full ticket record for the owner or an admin
    ///
    /// Existence is checked before authorization, so a ticket that is
    /// not there reads as missing to everyone, while one that exists but
    /// belongs to someone else is a forbidden access.
    pub async fn ticket_detail(&self, requester: &User, id: &TicketId) -> Result<Ticket> {
        let ticket = self
            .tickets
            .find_by_id(id)
            .await?
            .ok_or_else(|| SmartTicketError::TicketNotFound { id: id.to_string() })?;

        if ticket.owner_id != requester.id && !requester.role.is_admin() {
            return Err(SmartTicketError::TicketAccessDenied { id: id.to_string() });
        }
        Ok(ticket)
    }

    /// Apply a sparse admin patch and return the ticket as stored
    ///
    /// A patch with no fields never reaches the store. A patch that
    /// matches no ticket reports the ticket as missing.
    pub async fn admin_update(
        &self,
        requester: &User,
        id: &TicketId,
        update: TicketUpdate,
    ) -> Result<Ticket> {
        require_admin(requester)?;

        if update.is_empty() {
            debug!(ticket_id = %id, "admin update carried no fields");
            return Err(SmartTicketError::EmptyPatch);
        }

        let patch = update.into_patch();
        let matched = self.tickets.partial_update(id, &patch, Utc::now()).await?;
        if matched == 0 {
            return Err(SmartTicketError::TicketNotFound { id: id.to_string() });
        }

        info!(ticket_id = %id, admin_id = %requester.id, "applied admin update");
        // read back so the caller sees exactly what was stored
        self.tickets
            .find_by_id(id)
            .await?
            .ok_or_else(|| SmartTicketError::TicketNotFound { id: id.to_string() })
    }
}
