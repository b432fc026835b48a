//! Core contracts: errors, credentials, tokens, and ownership scoping

pub mod credentials;
pub mod error;
pub mod owned;
pub mod password;
pub mod repository;
pub mod token;

pub use credentials::{CredentialService, UserStore};
pub use error::{ApiError, ErrorResponse};
pub use owned::{Owned, OwnedStore};
pub use repository::OwnedRepository;
pub use token::{Claims, TokenService};
