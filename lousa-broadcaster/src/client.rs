use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Mutex;

use crate::error::Result;
use crate::events::BroadcastEvent;

/// Frames queued per client before it counts as too slow and is dropped
pub const CLIENT_QUEUE_CAPACITY: usize = 256;

/// Identifier of a connected page
pub type ClientId = u64;

/// Receiving half handed to the transport for one client
pub type ClientReceiver = mpsc::Receiver<String>;

/// Outbound handle of one connected page
pub struct Client {
    id: ClientId,
    tx: mpsc::Sender<String>,
    connected_at: DateTime<Utc>,
}

impl Client {
    pub fn new(id: ClientId) -> (Self, ClientReceiver) {
        let (tx, rx) = mpsc::channel(CLIENT_QUEUE_CAPACITY);
        let client = Self {
            id,
            tx,
            connected_at: Utc::now(),
        };
        (client, rx)
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Queue an already-encoded frame without waiting
    pub fn send_text(&self, text: String) -> std::result::Result<(), TrySendError<String>> {
        self.tx.try_send(text)
    }

    /// Queue an event without waiting
    pub fn send_event(&self, event: &BroadcastEvent) -> Result<()> {
        let text = event.to_json_text()?;
        self.send_text(text)
            .map_err(|_| crate::error::BroadcasterError::ClientGone(self.id))
    }

    fn connected_secs(&self) -> i64 {
        (Utc::now() - self.connected_at).num_seconds()
    }
}

/// Thread-safe client registry
pub struct ClientManager {
    clients: Arc<Mutex<HashMap<ClientId, Client>>>,
    next_id: AtomicU64,
}

impl ClientManager {
    pub fn new() -> Self {
        Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Allocate a handle for a new client without registering it
    pub fn create_client(&self) -> (Client, ClientReceiver) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        Client::new(id)
    }

    /// Add new client
    pub async fn add_client(&self, client: Client) {
        let mut clients = self.clients.lock().await;
        clients.insert(client.id(), client);
        tracing::info!("New client connected. Total clients: {}", clients.len());
    }

    /// Remove a client; returns false if it was already gone
    pub async fn remove_client(&self, id: ClientId) -> bool {
        let mut clients = self.clients.lock().await;
        match clients.remove(&id) {
            Some(client) => {
                tracing::info!(
                    "Client {} disconnected after {}s. Remaining: {}",
                    id,
                    client.connected_secs(),
                    clients.len()
                );
                true
            }
            None => false,
        }
    }

    /// Broadcast event to all clients, removing dead or stalled ones.
    ///
    /// Returns the number of clients the event was queued for.
    pub async fn broadcast(&self, event: &BroadcastEvent) -> Result<usize> {
        let text = event.to_json_text()?;
        let mut clients = self.clients.lock().await;
        let mut dead_ids = Vec::new();

        for (id, client) in clients.iter() {
            match client.send_text(text.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    tracing::warn!("Client {} is not keeping up, dropping it", id);
                    dead_ids.push(*id);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!("Client {} already closed", id);
                    dead_ids.push(*id);
                }
            }
        }

        for id in &dead_ids {
            clients.remove(id);
            tracing::info!("Removed dead client {}. Remaining: {}", id, clients.len());
        }

        Ok(clients.len())
    }

    /// Get current client count
    pub async fn client_count(&self) -> usize {
        self.clients.lock().await.len()
    }
}

impl Default for ClientManager {
    fn default() -> Self {
        Self::new()
    }
}
