use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, timeout_at};

use crate::application::ports::document_store::{DocumentConnector, DocumentStore};
use crate::application::ports::relational_store::{
    PoolSettings, RelationalConnector, RelationalStore,
};

use super::close_connections::{CloseConnections, CloseReport};

/// Shared deadline for connecting to and pinging the document store.
pub const DOCUMENT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Live handles to both stores. Only built once both are up.
#[derive(Clone)]
pub struct ConnectionBundle {
    pub relational: Arc<dyn RelationalStore>,
    pub document: Arc<dyn DocumentStore>,
}

impl ConnectionBundle {
    pub async fn close(&self) -> CloseReport {
        CloseConnections {
            relational: Some(self.relational.as_ref()),
            document: Some(self.document.as_ref()),
        }
        .execute()
        .await
    }
}

/// Relational store that a failed startup left behind, if it was not released.
pub struct RetainedRelational(Option<Arc<dyn RelationalStore>>);

impl RetainedRelational {
    pub fn get(&self) -> Option<&Arc<dyn RelationalStore>> {
        self.0.as_ref()
    }
}

impl fmt::Debug for RetainedRelational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(_) => f.write_str("RetainedRelational(open)"),
            None => f.write_str("RetainedRelational(released)"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum OpenConnectionsError {
    #[error("failed to connect to relational store")]
    Relational(#[source] anyhow::Error),
    #[error("failed to connect to document store")]
    DocumentConnect {
        #[source]
        source: anyhow::Error,
        relational: RetainedRelational,
    },
    #[error("failed to ping document store primary")]
    DocumentPing {
        #[source]
        source: anyhow::Error,
        relational: RetainedRelational,
    },
    #[error("document store did not answer within {timeout:?}")]
    DocumentTimeout {
        timeout: Duration,
        relational: RetainedRelational,
    },
}

impl OpenConnectionsError {
    /// The relational store opened before the document store failed. `None`
    /// when the relational step itself failed or the store was released.
    pub fn retained_relational(&self) -> Option<&Arc<dyn RelationalStore>> {
        match self {
            Self::Relational(_) => None,
            Self::DocumentConnect { relational, .. }
            | Self::DocumentPing { relational, .. }
            | Self::DocumentTimeout { relational, .. } => relational.get(),
        }
    }
}

/// Opens the relational store, then the document store. Strictly sequential,
/// no retries: the first failure ends the attempt.
pub struct OpenConnections<'a, R, D>
where
    R: RelationalConnector + ?Sized,
    D: DocumentConnector + ?Sized,
{
    pub relational: &'a R,
    pub document: &'a D,
    pub pool: PoolSettings,
    pub document_timeout: Duration,
    /// Close the relational store again when a later step fails. Off by
    /// default: the store then stays open and is handed back in the error.
    pub release_on_failure: bool,
}

impl<'a, R, D> OpenConnections<'a, R, D>
where
    R: RelationalConnector + ?Sized,
    D: DocumentConnector + ?Sized,
{
    pub fn new(relational: &'a R, document: &'a D) -> Self {
        Self {
            relational,
            document,
            pool: PoolSettings::STANDARD,
            document_timeout: DOCUMENT_STORE_TIMEOUT,
            release_on_failure: false,
        }
    }

    pub fn release_on_failure(mut self, release: bool) -> Self {
        self.release_on_failure = release;
        self
    }

    pub async fn execute(
        &self,
        relational_url: &str,
        document_uri: &str,
    ) -> Result<ConnectionBundle, OpenConnectionsError> {
        tracing::info!("connecting_to_relational_store");
        let relational = self
            .relational
            .open(relational_url, &self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "relational_store_connect_failed");
                OpenConnectionsError::Relational(e)
            })?;
        tracing::info!(
            max_idle = self.pool.max_idle,
            max_open = self.pool.max_open,
            max_lifetime_secs = self.pool.max_lifetime.as_secs(),
            "relational_store_connected"
        );

        tracing::info!(
            timeout_secs = self.document_timeout.as_secs(),
            "connecting_to_document_store"
        );
        let deadline = Instant::now() + self.document_timeout;

        let document = match timeout_at(deadline, self.document.connect(document_uri)).await {
            Ok(Ok(store)) => store,
            Ok(Err(e)) => {
                tracing::error!(error = ?e, "document_store_connect_failed");
                let relational = self.settle(relational, None).await;
                return Err(OpenConnectionsError::DocumentConnect {
                    source: e,
                    relational,
                });
            }
            Err(_) => {
                tracing::error!(stage = "connect", "document_store_timed_out");
                let relational = self.settle(relational, None).await;
                return Err(OpenConnectionsError::DocumentTimeout {
                    timeout: self.document_timeout,
                    relational,
                });
            }
        };

        match timeout_at(deadline, document.ping_primary()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::error!(error = ?e, "document_store_ping_failed");
                let relational = self.settle(relational, Some(document.as_ref())).await;
                return Err(OpenConnectionsError::DocumentPing {
                    source: e,
                    relational,
                });
            }
            Err(_) => {
                tracing::error!(stage = "ping", "document_store_timed_out");
                let relational = self.settle(relational, Some(document.as_ref())).await;
                return Err(OpenConnectionsError::DocumentTimeout {
                    timeout: self.document_timeout,
                    relational,
                });
            }
        }
        tracing::info!("document_store_connected");

        Ok(ConnectionBundle {
            relational,
            document,
        })
    }

    async fn settle(
        &self,
        relational: Arc<dyn RelationalStore>,
        document: Option<&dyn DocumentStore>,
    ) -> RetainedRelational {
        if !self.release_on_failure {
            tracing::warn!("relational_store_left_open_after_failed_startup");
            return RetainedRelational(Some(relational));
        }
        CloseConnections {
            relational: Some(relational.as_ref()),
            document,
        }
        .execute()
        .await;
        RetainedRelational(None)
    }
}
