//! Lousa server - real-time classroom call board
//!
//! Phones open `/` and submit a name; the display at `/lousa` shows it
//! instantly along with running totals. Everything lives in memory.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use lousa_server::config::{AsyncMode, Cli, ServerConfig};
use lousa_server::server;
use lousa_server::state::AppState;

fn main() -> Result<()> {
    // .env is optional
    let dotenv_path = dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = ServerConfig::from_env()
        .context("Failed to load configuration")?
        .with_cli(&cli);

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(config.log_level.as_level())
        .init();

    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }
    let requested_mode = cli.async_mode.clone().or_else(|| std::env::var("ASYNC_MODE").ok());
    if let Some(raw) = requested_mode.filter(|m| !m.trim().is_empty()) {
        if let Err(e) = raw.parse::<AsyncMode>() {
            warn!("{}, falling back to {}", e, config.async_mode);
        }
    }
    if config.uses_default_secret() {
        warn!("SECRET_KEY not set, using the built-in default");
    }

    let runtime = match config.async_mode {
        AsyncMode::MultiThread => tokio::runtime::Builder::new_multi_thread(),
        AsyncMode::CurrentThread => tokio::runtime::Builder::new_current_thread(),
    }
    .enable_all()
    .build()
    .context("Failed to build async runtime")?;

    runtime.block_on(run(config))
}

async fn run(config: ServerConfig) -> Result<()> {
    let state = AppState::new(config);
    let listener = server::bind(&state).await?;

    server::log_banner(&state);

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal");
        }
    };

    server::serve(listener, state, shutdown).await
}
