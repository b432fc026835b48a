//! # taskdeck
//!
//! A personal task-tracking REST API: users register, authenticate, and
//! manage a private list of tasks through a JSON API backed by a document
//! store.
//!
//! ## Architecture
//!
//! - **Credential store** ([`core::credentials`]): user records with salted
//!   argon2 password hashes; email immutable after signup.
//! - **Token service** ([`core::token`]): stateless HS256 session tokens;
//!   validity is purely signature plus expiry, nothing server-side.
//! - **Auth middleware** ([`server::middleware`]): resolves the bearer token
//!   to a caller identity or rejects with 401 before any handler runs.
//! - **Ownership-scoped repository** ([`core::repository`]): every read and
//!   write of a task is implicitly filtered by the caller's identity; a
//!   record owned by someone else is indistinguishable from one that does
//!   not exist.
//! - **Storage backends** ([`storage`]): in-memory (default feature
//!   `in-memory`) and MongoDB (`mongodb_backend`).

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::config::{AppConfig, AuthConfig, DatabaseConfig};
    pub use crate::core::{
        ApiError, CredentialService, Owned, OwnedRepository, OwnedStore, TokenService, UserStore,
    };
    pub use crate::entities::{ProfileUpdate, Task, TaskPriority, TaskStatus, User, UserProfile};
    pub use crate::server::{AppState, AuthUser, build_router};
    pub use crate::storage::{InMemoryOwnedStore, InMemoryUserStore};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
