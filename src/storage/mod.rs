//! Storage implementations for smart-ticket
//!
//! Two store traits ([`UserStore`], [`TicketStore`]) and two backends:
//! [`FileStorage`] for durable YAML-per-record persistence and
//! [`MemoryStorage`] for tests and ephemeral runs. Services receive
//! store handles as `Arc<dyn ...>` at construction; nothing reaches for
//! a global.

mod file;
mod memory;
mod repository;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use repository::{MAX_RESULTS, TicketStore, UserStore};
