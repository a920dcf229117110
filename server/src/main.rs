//! Green Bin gateway server binary

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use greenbin_gateway::{app, AppState, GatewayConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("greenbin_gateway=info,tower_http=info")),
        )
        .init();

    let config = GatewayConfig::from_env().context("invalid gateway configuration")?;
    let state = AppState::from_config(&config);

    info!(
        gemini = config.gemini_api_key.is_some(),
        model = %config.gemini_model,
        imagine_pro = config.imaginepro_api_key.is_some(),
        eth_rpc = config.eth_rpc_url.is_some(),
        "provider configuration loaded"
    );

    let addr = config.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::AddrInUse => {
            anyhow::bail!(
                "port {} is already in use; stop the other process or set PORT",
                config.port
            );
        }
        Err(err) => return Err(err).with_context(|| format!("failed to bind {addr}")),
    };

    info!("Server starting on {}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
