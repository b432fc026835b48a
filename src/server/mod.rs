//! HTTP exposure: state, middleware, handlers, and router

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use middleware::AuthUser;
pub use router::build_router;
pub use state::AppState;
