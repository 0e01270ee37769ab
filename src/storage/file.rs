//! File-based storage backend
//!
//! One YAML document per record under the data directory:
//!
//! ```text
//! <data_dir>/users/<user_id>.yaml
//! <data_dir>/tickets/<ticket_id>.yaml
//! ```
//!
//! Writes go to a temp file first and are renamed into place, and a
//! single mutex serializes the write path, so each record write is
//! atomic with respect to readers and other writers in this process.

use super::repository::{TicketStore, UserStore, newest_first_capped};
use crate::core::{Ticket, TicketId, TicketPatch, User, UserId};
use crate::error::{Result, SmartTicketError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// YAML-per-record implementation of both store traits
pub struct FileStorage {
    users_dir: PathBuf,
    tickets_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Create a storage handle rooted at the given data directory
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            users_dir: data_dir.join("users"),
            tickets_dir: data_dir.join("tickets"),
            write_lock: Mutex::new(()),
        }
    }

    /// Create the record directories if they do not exist yet
    pub async fn init(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.users_dir).await?;
        tokio::fs::create_dir_all(&self.tickets_dir).await?;
        Ok(())
    }

    fn user_path(&self, id: &UserId) -> PathBuf {
        self.users_dir.join(format!("{id}.yaml"))
    }

    fn ticket_path(&self, id: &TicketId) -> PathBuf {
        self.tickets_dir.join(format!("{id}.yaml"))
    }

    /// Read one record, mapping a missing file to `None`
    async fn read_record<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(serde_yaml::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SmartTicketError::Io(e)),
        }
    }

    /// Write one record via temp file plus rename
    ///
    /// Callers must hold `write_lock`.
    async fn write_record<T: Serialize>(&self, path: &Path, record: &T) -> Result<()> {
        let yaml = serde_yaml::to_string(record)?;
        let tmp = path.with_extension("yaml.tmp");
        tokio::fs::write(&tmp, yaml).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Load every record in a directory, skipping temp leftovers
    async fn read_dir_records<T: DeserializeOwned>(&self, dir: &Path) -> Result<Vec<T>> {
        let mut records = Vec::new();
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(records),
            Err(e) => return Err(SmartTicketError::Io(e)),
        };
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let content = tokio::fs::read_to_string(&path).await?;
            records.push(serde_yaml::from_str(&content)?);
        }
        Ok(records)
    }

    async fn load_all_users(&self) -> Result<Vec<User>> {
        self.read_dir_records(&self.users_dir).await
    }

    async fn load_all_tickets(&self) -> Result<Vec<Ticket>> {
        self.read_dir_records(&self.tickets_dir).await
    }
}

#[async_trait]
impl UserStore for FileStorage {
    async fn insert(&self, user: &User) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let existing = self.load_all_users().await?;
        if existing.iter().any(|u| u.email == user.email) {
            return Err(SmartTicketError::EmailTaken {
                email: user.email.clone(),
            });
        }
        self.write_record(&self.user_path(&user.id), user).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.load_all_users().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }
}

#[async_trait]
impl TicketStore for FileStorage {
    async fn insert(&self, ticket: &Ticket) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_record(&self.ticket_path(&ticket.id), ticket)
            .await
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>> {
        self.read_record(&self.ticket_path(id)).await
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Ticket>> {
        let tickets = self.load_all_tickets().await?;
        let owned = tickets
            .into_iter()
            .filter(|t| &t.owner_id == owner)
            .collect();
        Ok(newest_first_capped(owned))
    }

    async fn find_all(&self) -> Result<Vec<Ticket>> {
        let tickets = self.load_all_tickets().await?;
        Ok(newest_first_capped(tickets))
    }

    async fn partial_update(
        &self,
        id: &TicketId,
        patch: &TicketPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<u64> {
        let _guard = self.write_lock.lock().await;
        let path = self.ticket_path(id);
        let Some(mut ticket) = self.read_record::<Ticket>(&path).await? else {
            return Ok(0);
        };
        patch.apply(&mut ticket);
        ticket.updated_at = updated_at;
        self.write_record(&path, &ticket).await?;
        Ok(1)
    }
}
