use std::sync::Arc;

use crate::application::ports::document_store::DocumentStore;
use crate::application::ports::relational_store::RelationalStore;
use crate::application::use_cases::connections::ConnectionBundle;
use crate::bootstrap::config::Config;

/// State handed to every handler. Cloning is cheap; the bundle is shared, never mutated.
#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    connections: Arc<ConnectionBundle>,
}

impl AppContext {
    pub fn new(cfg: Config, connections: ConnectionBundle) -> Self {
        Self {
            cfg,
            connections: Arc::new(connections),
        }
    }

    pub fn connections(&self) -> &ConnectionBundle {
        &self.connections
    }

    pub fn relational_store(&self) -> Arc<dyn RelationalStore> {
        self.connections.relational.clone()
    }

    pub fn document_store(&self) -> Arc<dyn DocumentStore> {
        self.connections.document.clone()
    }
}
