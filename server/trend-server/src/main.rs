//! Entry point: configuration, mock store and server setup

mod mock;
mod routes;
mod settings;

use std::sync::Arc;

use chrono::Utc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::settings::load_server_config;
use crate::mock::WeightStore;
use crate::routes::{ServerState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trend_server=info,tower_http=info")),
        )
        .init();

    let config = load_server_config()?;
    tracing::debug!("{:?}", config);

    let store = WeightStore::seeded(&config.seed_users, config.history_days, Utc::now());
    tracing::info!("Mock store ready with {} users", store.user_count());
    let state = Arc::new(ServerState {
        store,
        default_user: config.default_user.clone(),
    });

    let app = router(state, &config.static_dir);

    let listener = TcpListener::bind(&config.listen_addr).await?;
    tracing::info!(
        "Starting trend-server on {} (static files from {})",
        config.listen_addr,
        config.static_dir
    );

    axum::serve(listener, app).await?;

    Ok(())
}
