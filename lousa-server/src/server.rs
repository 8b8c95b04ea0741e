//! Server lifecycle: bind, serve, graceful shutdown

use anyhow::{Context, Result};
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

use crate::routes;
use crate::state::AppState;

/// Bind the configured address
pub async fn bind(state: &AppState) -> Result<TcpListener> {
    let addr = state.config.bind_addr();
    let listener = TcpListener::bind(&addr).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::AddrInUse => anyhow::anyhow!(
            "Failed to bind to {}: address already in use (is another instance running?)",
            addr
        ),
        _ => anyhow::Error::new(e).context(format!("Failed to bind to {}", addr)),
    })?;
    Ok(listener)
}

/// Serve until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = routes::build_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Log where the pages can be reached
pub fn log_banner(state: &AppState) {
    let config = &state.config;
    let base = format!("http://{}:{}", config.host, config.port);

    info!("=== Lousa: tela interativa de resgate ===");
    info!("Async mode: {}", config.async_mode);
    info!("Entrada:    {}/ (celular)", base);
    info!("Lousa:      {}/lousa", base);
    if state.board.admin_reset_enabled() {
        info!("Admin reset enabled at {}/admin/reset?token=...", base);
    } else {
        info!("Admin reset disabled (ADMIN_TOKEN not set)");
    }
}
