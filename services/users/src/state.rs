//! Application state shared across handlers

use std::sync::Arc;

use crate::repositories::UserController;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserController>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserController>) -> Self {
        Self { users }
    }
}
