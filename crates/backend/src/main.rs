use std::net::SocketAddr;
use std::sync::Arc;

use backend::shared::config::{get_data_dir, get_database_path, load_config};
use backend::shared::data::acquisition::http_source::default_sources;
use backend::shared::data::db;
use backend::shared::state::AppState;
use backend::{routes, system};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = load_config()?;
    tracing::info!(
        "Config: port {}, data from {}, fixed cost {:.2}",
        config.server.port,
        config.data.base_url,
        config.metrics.fixed_cost().value()
    );

    db::initialize_database(&get_database_path(&config))
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    let sources = default_sources(&config.data)?;
    let data_dir = get_data_dir(&config);
    let port = config.server.port;
    let state = Arc::new(AppState::new(config, sources));

    let app = routes::configure_routes(state.clone(), &data_dir);

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    // The first strategy may be this very server, so loading starts once it listens
    tokio::spawn(async move {
        if let Err(e) = state.reload().await {
            tracing::error!("Dashboards stay unavailable until POST /api/data/reload succeeds: {}", e);
        }
    });

    axum::serve(listener, app).await?;

    Ok(())
}
