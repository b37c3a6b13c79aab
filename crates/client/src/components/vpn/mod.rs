//! Connection widgets.

pub mod connect_button;
pub mod connection_status;
pub mod server_item;

pub use connect_button::*;
pub use connection_status::*;
pub use server_item::*;
