//! Shared handler state

use std::sync::Arc;

use crate::auth::AdminAuth;
use crate::catalog::{CourseSource, DatasetLoader};

/// State shared across all handlers
#[derive(Debug)]
pub struct AppState {
    /// Process-scoped course collection
    pub catalog: DatasetLoader,
    /// Admin token and credentials
    pub auth: AdminAuth,
    /// Write uploaded datasets back to the source
    pub persist_uploads: bool,
}

impl AppState {
    pub fn new(source: Arc<dyn CourseSource>, auth: AdminAuth) -> Self {
        Self {
            catalog: DatasetLoader::new(source),
            auth,
            persist_uploads: false,
        }
    }

    pub fn with_persist_uploads(mut self, persist: bool) -> Self {
        self.persist_uploads = persist;
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
