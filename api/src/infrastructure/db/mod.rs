use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use log::LevelFilter;
use sqlx::ConnectOptions;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};

use crate::application::ports::relational_store::{
    PoolSettings, RelationalConnector, RelationalStore,
};

pub type PgPool = Pool<Postgres>;

pub const SLOW_STATEMENT_THRESHOLD: Duration = Duration::from_millis(200);

/// Idle connections beyond what traffic needs are closed after this long.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(30);

pub fn connect_options(database_url: &str) -> anyhow::Result<PgConnectOptions> {
    let options = PgConnectOptions::from_str(database_url)
        .context("postgres_url_invalid")?
        .log_statements(LevelFilter::Info)
        .log_slow_statements(LevelFilter::Warn, SLOW_STATEMENT_THRESHOLD);
    Ok(options)
}

/// `max_idle` has no sqlx counterpart. The pool opens connections lazily and
/// closes idle ones after [`IDLE_TIMEOUT`] instead of keeping a warm floor.
pub fn pool_options(pool: &PoolSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(pool.max_open)
        .min_connections(0)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(pool.max_lifetime)
}

pub async fn connect_pool(database_url: &str, pool: &PoolSettings) -> anyhow::Result<PgPool> {
    let options = connect_options(database_url)?;
    let pool = pool_options(pool)
        .connect_with(options)
        .await
        .context("postgres_connect")?;
    Ok(pool)
}

pub struct SqlxRelationalStore {
    pub pool: PgPool,
}

impl SqlxRelationalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RelationalStore for SqlxRelationalStore {
    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn close(&self) -> anyhow::Result<()> {
        self.pool.close().await;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PgConnector;

#[async_trait]
impl RelationalConnector for PgConnector {
    async fn open(
        &self,
        url: &str,
        pool: &PoolSettings,
    ) -> anyhow::Result<Arc<dyn RelationalStore>> {
        let pool = connect_pool(url, pool).await?;
        Ok(Arc::new(SqlxRelationalStore::new(pool)))
    }
}
