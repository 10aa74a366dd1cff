//! Backend entry-point: loads settings, prepares the database and serves the
//! REST API with its OpenAPI docs.

mod server;

use actix_web::web;
use color_eyre::eyre::WrapErr;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use tourbook::inbound::http::health::HealthState;
use tourbook::outbound::persistence::{DbPool, run_migrations};

use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let bind_addr = settings.bind_addr()?;
    let pool_config = settings.pool_config()?;

    if settings.run_migrations() {
        let applied = run_migrations(pool_config.database_url().to_owned())
            .await
            .wrap_err("failed to apply database migrations")?;
        info!(applied, "database migrations complete");
    }

    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr).with_db_pool(pool);
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "server listening");
    server.await?;
    Ok(())
}
