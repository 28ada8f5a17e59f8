use std::sync::Arc;

use async_trait::async_trait;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Round-trips a ping to the primary node.
    async fn ping_primary(&self) -> anyhow::Result<()>;
    /// Not time-bounded; waits for the driver to finish tearing down.
    async fn disconnect(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait DocumentConnector: Send + Sync {
    async fn connect(&self, uri: &str) -> anyhow::Result<Arc<dyn DocumentStore>>;
}
