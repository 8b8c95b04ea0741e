//! Error types for the HTTP layer and configuration

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lousa_broadcaster::BroadcasterError;
use thiserror::Error;

/// Body returned when admin reset is refused
pub const ACCESS_DENIED_BODY: &str = "Acesso negado";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid PORT value '{0}': expected a number between 0 and 65535")]
    InvalidPort(String),

    #[error("Invalid LOG_LEVEL value '{0}'")]
    InvalidLogLevel(String),

    #[error("Unknown async mode '{0}'")]
    UnknownAsyncMode(String),
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Access denied")]
    Forbidden,

    #[error("Broadcast failed: {0}")]
    Broadcast(BroadcasterError),
}

impl From<BroadcasterError> for ServerError {
    fn from(err: BroadcasterError) -> Self {
        match err {
            BroadcasterError::Unauthorized => ServerError::Forbidden,
            other => ServerError::Broadcast(other),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::Forbidden => (StatusCode::FORBIDDEN, ACCESS_DENIED_BODY).into_response(),
            ServerError::Broadcast(e) => {
                tracing::error!("Request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro interno").into_response()
            }
        }
    }
}
