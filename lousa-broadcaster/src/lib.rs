//! Real-time broadcaster for the Lousa call board
//!
//! This crate owns the stats ledger and pushes its updates to every
//! connected page. It is transport-agnostic: each client is an outbound
//! queue of JSON text frames, and the server crate pumps those queues into
//! WebSockets.
//!
//! # Features
//!
//! - Registry of connected clients keyed by id
//! - Fire-and-forget fan-out (dead or stalled clients are dropped)
//! - New client catch-up (current snapshot is always the first frame)
//! - Token-guarded admin reset
//!
//! # Event Types
//!
//! - `stats_update` - Full snapshot, sent on connect and after every change
//! - `atualizar_lousa` - A single accepted name
//! - `novo_responsavel` - Inbound submission from the entry page
//!
//! # Example Usage
//!
//! ```no_run
//! use lousa_broadcaster::CallBoard;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let board = CallBoard::new(Some("admin-secret".to_string()));
//!
//!     // A display connects and immediately receives the current stats
//!     let (id, mut frames) = board.connect().await?;
//!     let first = frames.recv().await;
//!
//!     // A guardian submits a name
//!     board.submit("Ana").await?;
//!
//!     // Start the day from zero
//!     board.admin_reset(Some("admin-secret")).await?;
//!
//!     board.disconnect(id).await;
//!     Ok(())
//! }
//! ```

pub mod broadcaster;
pub mod client;
pub mod error;
pub mod events;

// Re-exports
pub use broadcaster::CallBoard;
pub use client::{ClientId, ClientReceiver};
pub use error::{BroadcasterError, Result};
pub use events::{BroadcastEvent, ClientMessage};
