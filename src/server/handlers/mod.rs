//! HTTP handlers

pub mod auth;
pub mod profile;
pub mod tasks;
