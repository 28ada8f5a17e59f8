use std::future::Future;
use std::time::Duration;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::bootstrap::app_context::AppContext;

const PING_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
pub struct HealthResp {
    pub status: &'static str,
    pub relational: &'static str,
    pub document: &'static str,
}

fn label(ok: bool) -> &'static str {
    if ok { "ok" } else { "unavailable" }
}

async fn reachable<F>(check: F) -> bool
where
    F: Future<Output = anyhow::Result<()>>,
{
    matches!(tokio::time::timeout(PING_TIMEOUT, check).await, Ok(Ok(())))
}

pub async fn health(State(ctx): State<AppContext>) -> Json<HealthResp> {
    let relational = ctx.relational_store();
    let document = ctx.document_store();
    let (relational_ok, document_ok) =
        tokio::join!(reachable(relational.ping()), reachable(document.ping_primary()));
    if !(relational_ok && document_ok) {
        tracing::warn!(relational_ok, document_ok, "health_degraded");
    }
    let status = if relational_ok && document_ok { "ok" } else { "degraded" };
    Json(HealthResp {
        status,
        relational: label(relational_ok),
        document: label(document_ok),
    })
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new().route("/health", get(health)).with_state(ctx)
}
