use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use contact_relay::config::Config;
use contact_relay::rate_limit::{self, CooldownStore, InMemoryCooldownStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present, then the deployment config file kept outside the site root
    let _ = dotenvy::dotenv();
    if let Ok(path) = std::env::var("CONTACT_RELAY_CONFIG_FILE") {
        dotenvy::from_path(&path)
            .map_err(|e| format!("Failed to read CONTACT_RELAY_CONFIG_FILE '{path}': {e}"))?;
    }

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    tracing::info!("Starting contact relay");

    let mailer = contact_relay::smtp_mailer(&config);
    let cooldowns: Arc<dyn CooldownStore> = Arc::new(InMemoryCooldownStore::new());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = rate_limit::spawn_sweeper(cooldowns.clone(), config.cooldown_secs, shutdown_rx);

    let addr = SocketAddr::new(config.host, config.port);
    let app = contact_relay::build_app(config, mailer, cooldowns);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    let _ = shutdown_tx.send(true);
    let _ = sweeper.await;

    Ok(())
}

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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
