use std::sync::Arc;

use crate::database::Store;
use crate::services::SessionManager;

/// Shared per-worker application data
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, sessions: SessionManager) -> Self {
        Self { store, sessions }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}
