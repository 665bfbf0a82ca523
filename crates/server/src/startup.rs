use std::future::Future;

use configs::AppConfig;
use models::KeyMatching;
use service::storage::JsonFileStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Prepare the backing file and wrap it in handler state.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let matching = KeyMatching::from_case_insensitive(cfg.storage.case_insensitive_keys);
    let store = JsonFileStore::new(&cfg.storage.data_file, matching);
    store.ensure_exists().await?;
    Ok(AppState::new(store))
}

/// Bind to the configured address and serve until `shutdown` resolves.
pub async fn serve<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(cfg.bind_addr()).await?;
    serve_on(listener, cfg, shutdown).await
}

/// Serve on an already bound listener; used by tests binding port 0.
pub async fn serve_on<F>(listener: TcpListener, cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = build_state(&cfg).await?;
    let app = routes::build_router(state, build_cors());
    let addr = listener.local_addr()?;
    info!(%addr, data_file = %cfg.storage.data_file.display(), "starting employees server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!(%addr, "employees server stopped");
    Ok(())
}

/// Resolves on Ctrl+C. Never resolves if the signal handler cannot be installed.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, shutting down"),
        Err(e) => {
            error!(event = "shutdown_signal", error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}
