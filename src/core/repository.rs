//! Ownership-scoped repository
//!
//! [`OwnedRepository`] is the one component through which handlers touch
//! user-owned records. It stamps the caller's identity onto new records,
//! maps "absent or foreign-owned" uniformly to [`ApiError::NotFound`], and
//! runs partial updates as fetch-then-mutate-then-persist against a single
//! record, relying on the storage layer's per-document atomicity.

use crate::core::error::ApiError;
use crate::core::owned::{Owned, OwnedStore};
use std::sync::Arc;
use uuid::Uuid;

/// Generic repository enforcing the ownership contract for one record type
pub struct OwnedRepository<T: Owned> {
    store: Arc<dyn OwnedStore<T>>,
}

impl<T: Owned> OwnedRepository<T> {
    pub fn new(store: Arc<dyn OwnedStore<T>>) -> Self {
        Self { store }
    }

    fn not_found() -> ApiError {
        ApiError::NotFound(format!("{} not found", T::record_name()))
    }

    /// List the caller's records, newest first
    pub async fn list(&self, owner_id: &Uuid) -> Result<Vec<T>, ApiError> {
        Ok(self.store.find_owned(owner_id).await?)
    }

    /// Get one of the caller's records by id.
    ///
    /// A record owned by someone else yields the same `NotFound` as a record
    /// that does not exist, so existence never leaks across accounts.
    pub async fn get(&self, owner_id: &Uuid, id: &Uuid) -> Result<T, ApiError> {
        self.store
            .find_one_owned(owner_id, id)
            .await?
            .ok_or_else(Self::not_found)
    }

    /// Create a record for the caller.
    ///
    /// The owner reference is overwritten with the caller's id; any owner
    /// value present on the input record is ignored.
    pub async fn create(&self, owner_id: &Uuid, mut record: T) -> Result<T, ApiError> {
        record.set_owner(*owner_id);
        Ok(self.store.insert(record).await?)
    }

    /// Apply a partial update to one of the caller's records.
    ///
    /// The patch closure mutates the fetched record in place; if it fails
    /// (e.g. an out-of-domain enum value) nothing is persisted. On success
    /// the update timestamp is bumped and the record replaced.
    pub async fn update_with<F>(&self, owner_id: &Uuid, id: &Uuid, patch: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut T) -> Result<(), ApiError> + Send,
    {
        let mut record = self.get(owner_id, id).await?;
        patch(&mut record)?;
        record.touch();

        self.store
            .replace_owned(owner_id, id, record)
            .await?
            .ok_or_else(Self::not_found)
    }

    /// Delete one of the caller's records by id
    pub async fn delete(&self, owner_id: &Uuid, id: &Uuid) -> Result<(), ApiError> {
        if self.store.delete_owned(owner_id, id).await? {
            Ok(())
        } else {
            Err(Self::not_found())
        }
    }
}
