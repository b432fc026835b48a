//! Shared application state
//!
//! The state is the only mutable-free process-wide data shared across
//! requests: the credential service, the task repository, and the token
//! service with its immutable signing secret.

use crate::config::AuthConfig;
use crate::core::credentials::{CredentialService, UserStore};
use crate::core::owned::OwnedStore;
use crate::core::repository::OwnedRepository;
use crate::core::token::TokenService;
use crate::entities::task::Task;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialService>,
    pub tasks: Arc<OwnedRepository<Task>>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        task_store: Arc<dyn OwnedStore<Task>>,
        auth: &AuthConfig,
    ) -> Self {
        Self {
            credentials: Arc::new(CredentialService::new(user_store)),
            tasks: Arc::new(OwnedRepository::new(task_store)),
            tokens: Arc::new(TokenService::new(auth)),
        }
    }

    /// State backed entirely by in-memory stores, for development and tests
    #[cfg(feature = "in-memory")]
    pub fn in_memory(auth: &AuthConfig) -> Self {
        use crate::storage::in_memory::{InMemoryOwnedStore, InMemoryUserStore};

        Self::new(
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryOwnedStore::new()),
            auth,
        )
    }
}
