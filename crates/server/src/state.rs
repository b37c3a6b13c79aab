//! Application state shared across request handlers.

use aurora_db::Aurora;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Aurora>,
}

impl AppState {
    pub fn new(db: Aurora) -> Self {
        Self { db: Arc::new(db) }
    }
}
