//! In-memory store used by tests and ephemeral dev runs

use super::repository::{TicketStore, UserStore, newest_first_capped};
use crate::core::{Ticket, TicketId, TicketPatch, User, UserId};
use crate::error::{Result, SmartTicketError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// HashMap-backed implementation of both store traits
///
/// Each operation takes the relevant lock exactly once, so individual
/// inserts and updates are atomic, matching the single-record guarantee
/// of the file store.
#[derive(Default)]
pub struct MemoryStorage {
    users: RwLock<HashMap<UserId, User>>,
    tickets: RwLock<HashMap<TicketId, Ticket>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStorage {
    async fn insert(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(SmartTicketError::EmailTaken {
                email: user.email.clone(),
            });
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl TicketStore for MemoryStorage {
    async fn insert(&self, ticket: &Ticket) -> Result<()> {
        let mut tickets = self.tickets.write().await;
        tickets.insert(ticket.id.clone(), ticket.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>> {
        let tickets = self.tickets.read().await;
        Ok(tickets.get(id).cloned())
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Ticket>> {
        let tickets = self.tickets.read().await;
        let owned: Vec<Ticket> = tickets
            .values()
            .filter(|t| &t.owner_id == owner)
            .cloned()
            .collect();
        Ok(newest_first_capped(owned))
    }

    async fn find_all(&self) -> Result<Vec<Ticket>> {
        let tickets = self.tickets.read().await;
        Ok(newest_first_capped(tickets.values().cloned().collect()))
    }

    async fn partial_update(
        &self,
        id: &TicketId,
        patch: &TicketPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<u64> {
        let mut tickets = self.tickets.write().await;
        match tickets.get_mut(id) {
            Some(ticket) => {
                patch.apply(ticket);
                ticket.updated_at = updated_at;
                Ok(1)
            },
            None => Ok(0),
        }
    }
}
