use std::future::Future;
use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::router;

pub async fn bind(addr: SocketAddr) -> anyhow::Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))
}

/// Serves until `shutdown` resolves or the listener errors.
pub async fn serve_on<S>(listener: TcpListener, ctx: AppContext, shutdown: S) -> anyhow::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown)
        .await
        .context("http_server_failed")?;
    info!("http_server_stopped");
    Ok(())
}

async fn serve<S>(ctx: AppContext, addr: SocketAddr, shutdown: S) -> anyhow::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let listener = bind(addr).await?;
    info!(%addr, "HTTP API listening");
    serve_on(listener, ctx, shutdown).await
}

/// Serves on `addr` until `shutdown` resolves, then closes the store
/// connections exactly once. The close also runs when binding or serving fails.
pub async fn run<S>(ctx: AppContext, addr: SocketAddr, shutdown: S) -> anyhow::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let served = serve(ctx.clone(), addr, shutdown).await;
    ctx.connections().close().await;
    served
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?e, "ctrl_c_handler_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = ?e, "sigterm_handler_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("shutdown_requested_ctrl_c"),
        () = terminate => info!("shutdown_requested_sigterm"),
    }
}
