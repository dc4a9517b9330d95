//! Backend entry-point: loads settings, opens the document store and serves
//! the REST endpoints.

mod server;

use std::net::{IpAddr, SocketAddr};

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use microloan_backend::config::AppSettings;
use microloan_backend::inbound::http::health::HealthState;
use server::{ServerConfig, create_server, open_store};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let host: IpAddr = settings.host().parse().map_err(|e| {
        std::io::Error::other(format!("invalid host {}: {e}", settings.host()))
    })?;
    let bind_addr = SocketAddr::new(host, settings.port);

    let wiring = open_store(&settings)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let config = ServerConfig::new(bind_addr, wiring.state).with_store_connected(wiring.connected);
    info!(
        address = %config.bind_addr(),
        database = settings.database_name(),
        store_connected = wiring.connected,
        "Microloan server listening"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
