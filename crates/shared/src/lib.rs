//! Shared types and utilities for the MatreshkaVPN server and client.

pub mod models;
pub mod protocol;
pub mod error;

pub use models::*;
pub use protocol::*;
pub use error::*;
