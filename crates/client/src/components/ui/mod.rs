//! UI primitives (Button, StatCard, spinner, premium modal)

pub mod button;
pub mod card;
pub mod loading_spinner;
pub mod premium_modal;

pub use button::*;
pub use card::*;
pub use loading_spinner::*;
pub use premium_modal::*;
