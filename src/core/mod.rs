//! Core domain types for smart-ticket
//!
//! Identifier newtypes, the user and ticket records, the enumerated
//! field vocabulary, and the ticket builder. Everything here is plain
//! data; authorization and lifecycle rules live in the engine.

mod builders;
mod fields;
mod id;
mod ticket;
mod user;

pub use builders::TicketBuilder;
pub use fields::{Priority, Role, Status, StatusUpdate, Urgency};
pub use id::{TicketId, UserId};
pub use ticket::{
    DEFAULT_CATEGORY, Ticket, TicketDraft, TicketPatch, TicketSummary, TicketUpdate,
};
pub use user::User;
