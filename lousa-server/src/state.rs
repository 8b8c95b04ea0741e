//! Shared application state passed to all route handlers

use lousa_broadcaster::CallBoard;
use std::sync::Arc;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Stats ledger and connected pages
    pub board: Arc<CallBoard>,
}

impl AppState {
    /// Create state with a fresh, empty board
    pub fn new(config: ServerConfig) -> Self {
        let board = CallBoard::new(config.admin_token.clone());
        Self {
            config: Arc::new(config),
            board: Arc::new(board),
        }
    }
}
