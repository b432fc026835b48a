//! Domain models

pub mod task;
pub mod user;

pub use task::{Task, TaskPriority, TaskStatus};
pub use user::{ProfileUpdate, User, UserProfile};
