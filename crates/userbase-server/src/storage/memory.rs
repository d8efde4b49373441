//! In-memory user repository using DashMap

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use userbase_core::{Result, UserRecord, UserRepository, UserbaseError};

/// Users keyed by identifier. DashMap shards the map behind read-write
/// locks, so concurrent handlers can read and insert without a global lock.
pub struct MemoryUserRepository {
    users: DashMap<String, UserRecord>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn list_all(&self) -> Result<Vec<UserRecord>> {
        Ok(self
            .users
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn get_by_identifier(&self, id: &str) -> Result<UserRecord> {
        self.users
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| UserbaseError::NotFound(id.to_string()))
    }

    async fn insert(&self, record: UserRecord) -> Result<UserRecord> {
        // Vacant-entry insert holds the shard lock, so two writers racing on
        // one identifier cannot both succeed.
        match self.users.entry(record.identifier.clone()) {
            Entry::Occupied(_) => Err(UserbaseError::Storage(format!(
                "identifier already exists: {}",
                record.identifier
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }
}
