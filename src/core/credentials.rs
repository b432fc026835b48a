//! Credential store
//!
//! Persists user identity records and owns everything touching the password
//! credential: hashing at signup, constant-time verification at login, and
//! the profile update policy (email is immutable after creation).

use crate::core::error::ApiError;
use crate::core::password::{hash_password, verify_password};
use crate::entities::user::{ProfileUpdate, User};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Storage trait for user identity records
///
/// Implementations are plain record stores; uniqueness and credential policy
/// live in [`CredentialService`].
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user record
    async fn insert(&self, user: User) -> Result<User>;

    /// Fetch a user by id
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>>;

    /// Fetch a user by email (case-sensitive, as stored)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Replace a user record by id. Returns `Ok(None)` if the id is unknown.
    async fn replace(&self, id: &Uuid, user: User) -> Result<Option<User>>;
}

/// Service wrapping a [`UserStore`] with credential handling
pub struct CredentialService {
    store: Arc<dyn UserStore>,
}

impl CredentialService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create a user, hashing the password before it is stored.
    ///
    /// Fails with `Conflict` when the email is already registered.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        if self.store.find_by_email(email).await?.is_some() {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(password)?;
        let user = User::new(name.to_string(), email.to_string(), password_hash);

        Ok(self.store.insert(user).await?)
    }

    /// Verify an (email, password) pair.
    ///
    /// Unknown email and wrong password produce the identical `Unauthorized`
    /// failure, so the response never reveals whether an account exists.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

        let user = self.store.find_by_email(email).await?.ok_or_else(invalid)?;

        if verify_password(password, &user.password_hash) {
            Ok(user)
        } else {
            Err(invalid())
        }
    }

    /// Fetch a user by id
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Apply a partial profile update.
    ///
    /// Email is immutable after creation: a request that tries to change it
    /// fails with a validation error rather than silently applying. Echoing
    /// back the current email is tolerated (clients resubmit whole forms).
    /// A blank or whitespace-only name is treated as "no change".
    pub async fn update_profile(
        &self,
        id: &Uuid,
        update: ProfileUpdate,
    ) -> Result<User, ApiError> {
        let mut user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        if let Some(email) = &update.email {
            if email != &user.email {
                return Err(ApiError::Validation(
                    "Email updates are not allowed".to_string(),
                ));
            }
        }

        if let Some(name) = &update.name {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                user.name = trimmed.to_string();
            }
        }

        user.touch();

        self.store
            .replace(id, user)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::in_memory::InMemoryUserStore;
    use axum::http::StatusCode;

    fn service() -> CredentialService {
        CredentialService::new(Arc::new(InMemoryUserStore::new()))
    }

    #[tokio::test]
    async fn test_signup_hashes_password() {
        let creds = service();
        let user = creds
            .create_user("Ana", "a@x.com", "secret1")
            .await
            .unwrap();

        assert_ne!(user.password_hash, "secret1");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let creds = service();
        creds.create_user("Ana", "a@x.com", "secret1").await.unwrap();

        let err = creds
            .create_user("Impostor", "a@x.com", "other")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_login_succeeds_only_with_matching_password() {
        let creds = service();
        let created = creds
            .create_user("Ana", "a@x.com", "secret1")
            .await
            .unwrap();

        let verified = creds.verify_credentials("a@x.com", "secret1").await.unwrap();
        assert_eq!(verified.id, created.id);

        assert!(creds.verify_credentials("a@x.com", "wrong").await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_look_identical() {
        let creds = service();
        creds.create_user("Ana", "a@x.com", "secret1").await.unwrap();

        let unknown = creds
            .verify_credentials("nobody@x.com", "secret1")
            .await
            .unwrap_err();
        let wrong = creds
            .verify_credentials("a@x.com", "wrong")
            .await
            .unwrap_err();

        assert_eq!(unknown.status_code(), wrong.status_code());
        assert_eq!(
            unknown.to_response().message,
            wrong.to_response().message
        );
    }

    #[tokio::test]
    async fn test_email_is_case_sensitive_as_stored() {
        let creds = service();
        creds.create_user("Ana", "a@x.com", "secret1").await.unwrap();

        assert!(creds.verify_credentials("A@X.com", "secret1").await.is_err());
    }

    #[tokio::test]
    async fn test_profile_email_change_is_rejected() {
        let creds = service();
        let user = creds
            .create_user("Ana", "a@x.com", "secret1")
            .await
            .unwrap();

        let err = creds
            .update_profile(
                &user.id,
                ProfileUpdate {
                    name: None,
                    email: Some("new@x.com".to_string()),
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_response().message, "Email updates are not allowed");

        // Nothing was applied.
        let stored = creds.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_profile_same_email_echo_is_tolerated() {
        let creds = service();
        let user = creds
            .create_user("Ana", "a@x.com", "secret1")
            .await
            .unwrap();

        let updated = creds
            .update_profile(
                &user.id,
                ProfileUpdate {
                    name: Some("Ana Maria".to_string()),
                    email: Some("a@x.com".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_blank_name_is_no_change() {
        let creds = service();
        let user = creds
            .create_user("Ana", "a@x.com", "secret1")
            .await
            .unwrap();

        let updated = creds
            .update_profile(
                &user.id,
                ProfileUpdate {
                    name: Some("   ".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Ana");
    }

    #[tokio::test]
    async fn test_name_is_trimmed() {
        let creds = service();
        let user = creds
            .create_user("Ana", "a@x.com", "secret1")
            .await
            .unwrap();

        let updated = creds
            .update_profile(
                &user.id,
                ProfileUpdate {
                    name: Some("  Ana B.  ".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Ana B.");
    }

    #[tokio::test]
    async fn test_update_unknown_user_is_not_found() {
        let creds = service();
        let err = creds
            .update_profile(
                &Uuid::new_v4(),
                ProfileUpdate {
                    name: Some("Ghost".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
