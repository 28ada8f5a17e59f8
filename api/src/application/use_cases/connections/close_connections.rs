use crate::application::ports::document_store::DocumentStore;
use crate::application::ports::relational_store::RelationalStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    Failed(String),
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseReport {
    pub relational: CloseOutcome,
    pub document: CloseOutcome,
}

impl CloseReport {
    pub fn is_clean(&self) -> bool {
        !matches!(self.relational, CloseOutcome::Failed(_))
            && !matches!(self.document, CloseOutcome::Failed(_))
    }
}

/// Best-effort teardown of both stores. Each member is closed independently
/// and failures are logged, never returned.
pub struct CloseConnections<'a> {
    pub relational: Option<&'a dyn RelationalStore>,
    pub document: Option<&'a dyn DocumentStore>,
}

impl CloseConnections<'_> {
    pub async fn execute(&self) -> CloseReport {
        tracing::info!("closing_database_connections");

        let relational = match self.relational {
            None => CloseOutcome::Absent,
            Some(store) => match store.close().await {
                Ok(()) => {
                    tracing::info!("relational_store_closed");
                    CloseOutcome::Closed
                }
                Err(e) => {
                    tracing::error!(error = ?e, "relational_store_close_failed");
                    CloseOutcome::Failed(format!("{e:#}"))
                }
            },
        };

        let document = match self.document {
            None => CloseOutcome::Absent,
            Some(store) => match store.disconnect().await {
                Ok(()) => {
                    tracing::info!("document_store_closed");
                    CloseOutcome::Closed
                }
                Err(e) => {
                    tracing::error!(error = ?e, "document_store_close_failed");
                    CloseOutcome::Failed(format!("{e:#}"))
                }
            },
        };

        CloseReport {
            relational,
            document,
        }
    }
}
