//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Gated behind the `mongodb_backend` feature flag. Uses a
//! collection-per-record-type pattern: tasks live in the collection named by
//! `T::collection_name()`, users in `users`.
//!
//! The ownership filter is part of every query document (`{_id, ownerId}`),
//! so a record belonging to another owner simply never matches — the same
//! shape as the in-memory backend.
//!
//! # Serialization strategy
//!
//! Records are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. UUIDs are stored as strings and
//! DateTimes as RFC 3339 strings; since chrono emits fractional seconds with
//! variable precision, listings are ordered on the parsed timestamps after
//! deserialization rather than by a server-side string sort. The `id` field
//! is mapped to MongoDB's `_id` convention.

use crate::core::credentials::UserStore;
use crate::core::owned::{Owned, OwnedStore};
use crate::entities::user::User;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document, doc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON
/// Document, renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id` for domain record convention.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// Convert a UUID to its BSON string representation for queries.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

fn to_document<T: Serialize>(record: &T) -> Result<Document> {
    let json =
        serde_json::to_value(record).map_err(|e| anyhow!("Failed to serialize record: {}", e))?;
    json_to_document(json)
}

fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T> {
    let json = document_to_json(doc);
    serde_json::from_value(json)
        .map_err(|e| anyhow!("Failed to deserialize record from document: {}", e))
}

/// Order records newest first by their creation timestamp
fn sort_newest_first<T: Owned>(records: &mut [T]) {
    records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}

// ---------------------------------------------------------------------------
// MongoOwnedStore<T>
// ---------------------------------------------------------------------------

/// Ownership-scoped record store backed by MongoDB
#[derive(Clone, Debug)]
pub struct MongoOwnedStore<T> {
    database: Database,
    _marker: std::marker::PhantomData<T>,
}

impl<T> MongoOwnedStore<T> {
    /// Create a new store with the given database handle
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T: Owned + Serialize + DeserializeOwned> MongoOwnedStore<T> {
    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(T::collection_name())
    }

    /// Compound filter binding the record id to the caller's identity
    fn owned_filter(owner_id: &Uuid, id: &Uuid) -> Document {
        doc! { "_id": uuid_bson(id), "ownerId": uuid_bson(owner_id) }
    }
}

#[async_trait]
impl<T: Owned + Serialize + DeserializeOwned> OwnedStore<T> for MongoOwnedStore<T> {
    async fn insert(&self, record: T) -> Result<T> {
        let doc = to_document(&record)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to insert record: {}", e))?;

        Ok(record)
    }

    async fn find_owned(&self, owner_id: &Uuid) -> Result<Vec<T>> {
        let cursor = self
            .collection()
            .find(doc! { "ownerId": uuid_bson(owner_id) })
            .await
            .map_err(|e| anyhow!("Failed to list records: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect records: {}", e))?;

        let mut records: Vec<T> = docs
            .into_iter()
            .map(from_document)
            .collect::<Result<_>>()?;
        sort_newest_first(&mut records);

        Ok(records)
    }

    async fn find_one_owned(&self, owner_id: &Uuid, id: &Uuid) -> Result<Option<T>> {
        let doc = self
            .collection()
            .find_one(Self::owned_filter(owner_id, id))
            .await
            .map_err(|e| anyhow!("Failed to get record: {}", e))?;

        match doc {
            Some(d) => Ok(Some(from_document(d)?)),
            None => Ok(None),
        }
    }

    async fn replace_owned(&self, owner_id: &Uuid, id: &Uuid, record: T) -> Result<Option<T>> {
        let doc = to_document(&record)?;

        let result = self
            .collection()
            .replace_one(Self::owned_filter(owner_id, id), doc)
            .await
            .map_err(|e| anyhow!("Failed to replace record: {}", e))?;

        if result.matched_count == 0 {
            return Ok(None);
        }

        Ok(Some(record))
    }

    async fn delete_owned(&self, owner_id: &Uuid, id: &Uuid) -> Result<bool> {
        let result = self
            .collection()
            .delete_one(Self::owned_filter(owner_id, id))
            .await
            .map_err(|e| anyhow!("Failed to delete record: {}", e))?;

        Ok(result.deleted_count > 0)
    }
}

// ---------------------------------------------------------------------------
// MongoUserStore
// ---------------------------------------------------------------------------

/// User record store backed by MongoDB.
///
/// Email uniqueness is checked by [`CredentialService`] before insert; for
/// defense against concurrent signups, deployments should also create a
/// unique index on `email`.
///
/// [`CredentialService`]: crate::core::credentials::CredentialService
#[derive(Clone, Debug)]
pub struct MongoUserStore {
    database: Database,
}

impl MongoUserStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection("users")
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, user: User) -> Result<User> {
        let doc = to_document(&user)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to insert user: {}", e))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to get user: {}", e))?;

        match doc {
            Some(d) => Ok(Some(from_document(d)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let doc = self
            .collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| anyhow!("Failed to get user by email: {}", e))?;

        match doc {
            Some(d) => Ok(Some(from_document(d)?)),
            None => Ok(None),
        }
    }

    async fn replace(&self, id: &Uuid, user: User) -> Result<Option<User>> {
        let doc = to_document(&user)?;

        let result = self
            .collection()
            .replace_one(doc! { "_id": uuid_bson(id) }, doc)
            .await
            .map_err(|e| anyhow!("Failed to replace user: {}", e))?;

        if result.matched_count == 0 {
            return Ok(None);
        }

        Ok(Some(user))
    }
}
