//! In-memory storage backend for testing and development
//!
//! Uses RwLock for thread-safe access. The ownership filter is applied
//! inside every query, exactly like the document-store backend.

use crate::core::credentials::UserStore;
use crate::core::owned::{Owned, OwnedStore};
use crate::entities::user::User;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory ownership-scoped record store
#[derive(Clone)]
pub struct InMemoryOwnedStore<T: Owned> {
    records: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Owned> InMemoryOwnedStore<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T: Owned> Default for InMemoryOwnedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Owned> OwnedStore<T> for InMemoryOwnedStore<T> {
    async fn insert(&self, record: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        records.insert(record.id(), record.clone());

        Ok(record)
    }

    async fn find_owned(&self, owner_id: &Uuid) -> Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut owned: Vec<T> = records
            .values()
            .filter(|r| &r.owner_id() == owner_id)
            .cloned()
            .collect();

        owned.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(owned)
    }

    async fn find_one_owned(&self, owner_id: &Uuid, id: &Uuid) -> Result<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records
            .get(id)
            .filter(|r| &r.owner_id() == owner_id)
            .cloned())
    }

    async fn replace_owned(&self, owner_id: &Uuid, id: &Uuid, record: T) -> Result<Option<T>> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match records.get(id) {
            Some(existing) if &existing.owner_id() == owner_id => {
                records.insert(*id, record.clone());
                Ok(Some(record))
            }
            _ => Ok(None),
        }
    }

    async fn delete_owned(&self, owner_id: &Uuid, id: &Uuid) -> Result<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match records.get(id) {
            Some(existing) if &existing.owner_id() == owner_id => {
                records.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// In-memory user record store
#[derive(Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: User) -> Result<User> {
        let mut users = self
            .users
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn replace(&self, id: &Uuid, user: User) -> Result<Option<User>> {
        let mut users = self
            .users
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if !users.contains_key(id) {
            return Ok(None);
        }

        users.insert(*id, user.clone());

        Ok(Some(user))
    }
}
