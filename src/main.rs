//! Payslip Engine HTTP server.
//!
//! Serves the payslip and PAYE endpoints. The tax table is read from
//! `PAYSLIP_CONFIG_DIR` when set, otherwise the built-in 2024/25 table is
//! used. The port comes from `PAYSLIP_PORT` (default 8080) and log
//! filtering from `RUST_LOG` (default `info`).

use std::net::SocketAddr;

use payslip_engine::api::{create_router, AppState};
use payslip_engine::config::ConfigLoader;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var("PAYSLIP_CONFIG_DIR") {
        Ok(dir) => {
            tracing::info!(config_dir = %dir, "Loading tax table from directory");
            ConfigLoader::load(&dir)?
        }
        Err(_) => ConfigLoader::embedded()?,
    };
    tracing::info!(
        tax_year = %config.tax_year().code,
        version = %config.tax_year().version,
        "Tax table loaded"
    );

    let port: u16 = std::env::var("PAYSLIP_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let app = create_router(AppState::new(config));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("payslip-engine listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
