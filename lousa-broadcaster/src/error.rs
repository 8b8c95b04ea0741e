use thiserror::Error;

use crate::client::ClientId;

#[derive(Error, Debug)]
pub enum BroadcasterError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Client {0} is no longer receiving")]
    ClientGone(ClientId),

    #[error("Admin token rejected")]
    Unauthorized,
}

pub type Result<T> = std::result::Result<T, BroadcasterError>;
