pub mod health;
pub mod root;

use axum::Router;
use axum::extract::MatchedPath;
use axum::http::Request;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::bootstrap::app_context::AppContext;

/// Routes plus the default middleware: request tracing and panic recovery.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .merge(root::routes())
        .merge(health::routes(ctx))
        .layer(CatchPanicLayer::new())
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        )
}
