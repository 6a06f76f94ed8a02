//! arbor-server - REST API server binary.

use std::net::SocketAddr;

use arbor_core::config::ArborConfig;
use arbor_server::{create_server, create_server_with_auth, AppState};
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Load configuration from the ARBOR_CONFIG file if set, else defaults.
fn load_config() -> Result<ArborConfig, Box<dyn std::error::Error>> {
    match std::env::var("ARBOR_CONFIG") {
        Ok(path) => {
            let content = std::fs::read_to_string(&path)?;
            let config = serde_json::from_str(&content)?;
            info!(path = %path, "Loaded configuration");
            Ok(config)
        }
        Err(_) => Ok(ArborConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("arbor_server=debug".parse().unwrap()),
        )
        .init();

    // Get configuration from environment
    let host = std::env::var("ARBOR_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("ARBOR_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("ARBOR_PORT must be a valid port number");
    let require_auth = std::env::var("ARBOR_REQUIRE_AUTH").is_ok();

    let config = load_config()?;
    let state = AppState::new(config);

    // Create server with or without auth
    let app = if require_auth {
        info!("Authentication enabled");
        create_server_with_auth(state.clone())
    } else {
        info!("Authentication disabled");
        create_server(state.clone())
    };

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!(addr = %addr, "arbor-server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
