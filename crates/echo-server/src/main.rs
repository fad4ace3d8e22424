//! WebApi Echo server binary.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let host = std::env::var("ECHO_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("ECHO_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .map_err(|e| format!("ECHO_PORT must be a valid port number: {e}"))?;

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| format!("invalid listen address {host}:{port}: {e}"))?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        "Starting WebApi echo server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        listener.local_addr()?
    );

    webapi_echo::serve(listener).await?;

    Ok(())
}
