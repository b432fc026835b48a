//! Storage backends

pub mod in_memory;

#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::{InMemoryOwnedStore, InMemoryUserStore};

#[cfg(feature = "mongodb_backend")]
pub use mongodb::{MongoOwnedStore, MongoUserStore};
