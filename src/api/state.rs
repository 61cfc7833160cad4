//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::{Database, MemoryUserStore, UserRepository, UserStore};
use crate::services::{UserManager, UserService};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
}

impl AppState {
    /// Create application state with a manually injected service.
    pub fn new(user_service: Arc<dyn UserService>) -> Self {
        Self { user_service }
    }

    /// Wire the user service on top of any repository implementation.
    pub fn from_repository(repo: Arc<dyn UserRepository>) -> Self {
        Self::new(Arc::new(UserManager::new(repo)))
    }

    /// State backed by the SeaORM store.
    pub fn from_database(database: &Database) -> Self {
        Self::from_repository(Arc::new(UserStore::new(database.get_connection())))
    }

    /// State backed by a fresh volatile store.
    pub fn in_memory() -> Self {
        Self::from_repository(Arc::new(MemoryUserStore::new()))
    }
}
