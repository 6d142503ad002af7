//! HTTP server for the attendance and payroll engine.
//!
//! Configuration is read from the directory named by `PAYROLL_CONFIG_DIR`
//! (default `./config/payroll`).

use std::process::ExitCode;

use tracing::{error, info};

use attendance_payroll::api::{create_router, AppState};
use attendance_payroll::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/payroll";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let config_dir =
        std::env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());

    let config = match ConfigLoader::load(&config_dir) {
        Ok(loader) => loader.into_config(),
        Err(err) => {
            error!(config_dir = %config_dir, error = %err, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let bind_address = config.organization().bind_address.clone();
    info!(
        organization = %config.organization().name,
        employees = config.roster().len(),
        rules_configured = config.rules().is_some(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let listener = match tokio::net::TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(bind_address = %bind_address, error = %err, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!(bind_address = %bind_address, "Server listening");

    if let Err(err) = axum::serve(listener, app).await {
        error!(error = %err, "Server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
