use anyhow::Context;
use tracing::info;

use commerce_api::application::use_cases::connections::OpenConnections;
use commerce_api::bootstrap::app_context::AppContext;
use commerce_api::bootstrap::config::{Config, EnvFile};
use commerce_api::bootstrap::server;
use commerce_api::infrastructure::db::PgConnector;
use commerce_api::infrastructure::docstore::MongoConnector;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = EnvFile::load();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                "commerce_api=debug,axum=info,tower_http=info,sqlx=info".into()
            }),
        )
        .init();
    env_file.report();

    let cfg = Config::from_env();
    info!(
        port = cfg.server_port,
        release_on_failure = cfg.release_on_failure,
        "Starting commerce API"
    );

    // Databases
    let documents = MongoConnector::default();
    let connections = OpenConnections::new(&PgConnector, &documents)
        .release_on_failure(cfg.release_on_failure)
        .execute(&cfg.postgres_url, &cfg.mongo_uri)
        .await
        .context("Failed to initialize database connections")?;
    info!("database_connections_ready");

    let addr = cfg.listen_addr();
    let ctx = AppContext::new(cfg, connections);
    server::run(ctx, addr, server::shutdown_signal()).await
}
