use nk_core::NorikaeConfig;
use nk_server::{app_with_state, state::AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = NorikaeConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.log_level))
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let app = app_with_state(AppState::from_config(&config)?);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(search_url = %config.transit.search_url, "norikae-server listening on {}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
