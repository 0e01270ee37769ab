use crate::core::{Ticket, TicketId, TicketPatch, User, UserId};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Hard cap on the number of tickets any list operation returns
pub const MAX_RESULTS: usize = 1000;

/// Store trait for user credential records
///
/// Implementations enforce email uniqueness on insert; there is no
/// update or delete surface because accounts are immutable.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user, failing with `EmailTaken` if the email exists
    async fn insert(&self, user: &User) -> Result<()>;

    /// Exact-match lookup by email, the login key
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Store trait for ticket records
///
/// Every operation is an independent atomic action on a single record;
/// there are no multi-record transactions. Both scan operations return
/// newest-created-first and never more than [`MAX_RESULTS`] tickets.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Inserts a new ticket
    async fn insert(&self, ticket: &Ticket) -> Result<()>;

    /// Exact-match lookup by id
    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>>;

    /// All tickets owned by one user
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Ticket>>;

    /// All tickets across all owners
    async fn find_all(&self) -> Result<Vec<Ticket>>;

    /// Applies the present patch fields plus `updated_at` to one ticket
    ///
    /// Returns how many records matched the id: 0 means the ticket does
    /// not exist and nothing was written, 1 means the patch was applied.
    async fn partial_update(
        &self,
        id: &TicketId,
        patch: &TicketPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<u64>;
}

/// Shared ordering contract for the two scan operations
pub(crate) fn newest_first_capped(mut tickets: Vec<Ticket>) -> Vec<Ticket> {
    tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    tickets.truncate(MAX_RESULTS);
    tickets
}
