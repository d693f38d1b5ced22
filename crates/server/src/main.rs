use std::sync::Arc;

use tracing::info;

use logpile_core::Config;
use logpile_server::state::AppState;
use logpile_server::wal::{self, WalWriter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    logpile_core::config::load_dotenv();
    let config = Config::from_env();
    config.log_summary();

    let store = logpile_store::spawn();

    // Rebuild the in-memory collection before accepting new traffic.
    wal::replay(&config.storage.wal_path, &store).await?;

    let wal = WalWriter::open(&config.storage.wal_path).await?;
    let state = Arc::new(AppState { store, wal });

    let app = logpile_server::router(state, &config.storage.site_dir);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
