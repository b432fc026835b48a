//! Ownership-scoped record traits
//!
//! Every read or write of a user-owned record goes through [`OwnedStore`],
//! whose methods take the caller's resolved owner id as part of the query
//! itself. A record that exists but belongs to a different owner is
//! indistinguishable from a record that does not exist at all.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for records that belong to exactly one user.
///
/// All owned records have:
/// - id: Unique identifier
/// - owner_id: The owning user's id
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
pub trait Owned: Clone + Send + Sync + 'static {
    /// The plural collection name used in storage (e.g., "tasks")
    fn collection_name() -> &'static str;

    /// The display name used in error messages (e.g., "Task")
    fn record_name() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> Uuid;

    /// Get the owning user's id
    fn owner_id(&self) -> Uuid;

    /// Overwrite the owner reference.
    ///
    /// Called by the repository when creating a record, so the stored owner
    /// is always the caller's identity regardless of the input payload.
    fn set_owner(&mut self, owner_id: Uuid);

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Bump the update timestamp to now
    fn touch(&mut self);
}

/// Storage trait for ownership-scoped record access
///
/// Implementations push the owner filter into the query itself (e.g. a
/// compound `{_id, ownerId}` filter in MongoDB) rather than filtering after
/// the fact. The service is agnostic to the underlying storage mechanism.
#[async_trait]
pub trait OwnedStore<T: Owned>: Send + Sync {
    /// Insert a new record
    async fn insert(&self, record: T) -> Result<T>;

    /// List all records for an owner, newest first (created_at descending)
    async fn find_owned(&self, owner_id: &Uuid) -> Result<Vec<T>>;

    /// Fetch a single record by id, scoped to the owner.
    ///
    /// Returns `Ok(None)` both when the record is absent and when it belongs
    /// to a different owner.
    async fn find_one_owned(&self, owner_id: &Uuid, id: &Uuid) -> Result<Option<T>>;

    /// Replace a record by id, scoped to the owner.
    ///
    /// Returns `Ok(None)` when no owned record matched.
    async fn replace_owned(&self, owner_id: &Uuid, id: &Uuid, record: T) -> Result<Option<T>>;

    /// Delete a record by id, scoped to the owner.
    ///
    /// Returns `Ok(false)` when no owned record matched.
    async fn delete_owned(&self, owner_id: &Uuid, id: &Uuid) -> Result<bool>;
}
