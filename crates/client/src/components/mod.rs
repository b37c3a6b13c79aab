//! Reusable UI components.

pub mod layout;
pub mod ui;
pub mod vpn;
