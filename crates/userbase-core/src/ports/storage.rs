//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use userbase_types::UserRecord;

/// User repository.
///
/// Every backend must behave identically from the caller's side:
/// - `list_all` on an empty store is `Ok(vec![])`, in no contractual order.
/// - `get_by_identifier` yields `UserbaseError::NotFound` for unknown ids.
/// - `insert` stores the record under its already-minted identifier and
///   returns what was persisted; a failed write is always an `Err`.
///   Inserting an identifier that already exists is a storage error.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<UserRecord>>;
    async fn get_by_identifier(&self, id: &str) -> Result<UserRecord>;
    async fn insert(&self, record: UserRecord) -> Result<UserRecord>;
}
