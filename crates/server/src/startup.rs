use std::{env, net::SocketAddr};

use anyhow::Context;
use common::utils::logging::init_logging_default;
use configs::{AppConfig, ServiceConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::routes::{self, ServerState};

/// Load config and open the database, applying pending migrations so a
/// fresh instance serves a ready schema.
async fn prepare() -> anyhow::Result<(AppConfig, DatabaseConnection)> {
    let config = AppConfig::load_or_default()?;
    let db = models::db::connect(&config.database)
        .await
        .context("database connection failed")?;
    migration::Migrator::up(&db, None)
        .await
        .context("schema migration failed")?;
    Ok((config, db))
}

/// Host and port come from the service section of the config file; the
/// per-service env vars win when set.
fn bind_addr(svc: &ServiceConfig, host_var: &str, port_var: &str) -> anyhow::Result<SocketAddr> {
    let host = env::var(host_var).unwrap_or_else(|_| svc.host.clone());
    let port = env::var(port_var)
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(svc.port);
    Ok(format!("{}:{}", host, port).parse()?)
}

async fn serve(app: axum::Router, addr: SocketAddr, service: &str) -> anyhow::Result<()> {
    info!(service, %addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Public entry: run the venue and artist listing service.
pub async fn run_fyyur() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let (config, db) = prepare().await?;
    let addr = bind_addr(&config.fyyur, "FYYUR_HOST", "FYYUR_PORT")?;
    let state = ServerState { db, config };
    serve(routes::listing_router(state), addr, "fyyur").await
}

/// Public entry: run the trivia service.
pub async fn run_trivia() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let (config, db) = prepare().await?;
    let addr = bind_addr(&config.trivia, "TRIVIA_HOST", "TRIVIA_PORT")?;
    let state = ServerState { db, config };
    serve(routes::trivia_router(state), addr, "trivia").await
}
