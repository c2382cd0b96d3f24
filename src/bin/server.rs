//! Shift Pay Engine HTTP server binary.
//!
//! Loads the deduction rate table, builds the router and serves the
//! calculation endpoints.
//!
//! # Usage
//!
//! ```bash
//! SHIFT_PAY_CONFIG_DIR=./config/default PORT=8080 cargo run --bin shift-pay-server
//! ```
//!
//! # Environment Variables
//!
//! - `SHIFT_PAY_CONFIG_DIR`: directory holding `rates.yaml` (default: ./config/default)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log filter (default: info)

use std::env;
use std::error::Error;
use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use shift_pay_engine::api::{AppState, create_router};
use shift_pay_engine::config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Shift Pay Engine HTTP Server");

    let config_dir =
        env::var("SHIFT_PAY_CONFIG_DIR").unwrap_or_else(|_| "./config/default".to_string());
    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        insurance_min_hours = config.rates().insurance_min_hours,
        "Rate table loaded"
    );

    let app = create_router(AppState::new(config));

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
