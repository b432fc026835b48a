//! User identity record and its API views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User identity record as persisted.
///
/// The password credential is stored only as a one-way salted hash. This
/// struct serializes fully for storage; API responses go through
/// [`UserProfile`], which never carries the hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump the update timestamp to now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Public view of a user, safe to return to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Partial profile update as accepted by `PUT /me`
#[derive(Debug, Clone, Default, Deserialize, validator::Validate)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}
