//! API route handlers.

pub mod auth;
pub mod connections;
pub mod root;
pub mod servers;
pub mod stats;
pub mod subscriptions;
