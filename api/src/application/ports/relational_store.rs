use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

/// Pool limits applied when the relational store is opened.
///
/// `max_idle` is advisory for sqlx pools: sqlx has no hard idle cap, so the
/// adapter opens connections on demand and reaps idle ones on a timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_idle: u32,
    pub max_open: u32,
    pub max_lifetime: Duration,
}

impl PoolSettings {
    pub const STANDARD: PoolSettings = PoolSettings {
        max_idle: 10,
        max_open: 100,
        max_lifetime: Duration::from_secs(60 * 60),
    };
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[async_trait]
pub trait RelationalStore: Send + Sync {
    async fn ping(&self) -> anyhow::Result<()>;
    async fn close(&self) -> anyhow::Result<()>;
    fn is_closed(&self) -> bool;
}

#[async_trait]
pub trait RelationalConnector: Send + Sync {
    async fn open(
        &self,
        url: &str,
        pool: &PoolSettings,
    ) -> anyhow::Result<Arc<dyn RelationalStore>>;
}
