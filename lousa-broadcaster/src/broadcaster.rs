use lousa_ledger::{StatsLedger, StatsSnapshot};
use tokio::sync::Mutex;

use crate::client::{ClientId, ClientManager, ClientReceiver};
use crate::error::{BroadcasterError, Result};
use crate::events::BroadcastEvent;

/// Real-time call board: owns the stats ledger and fans its updates out to
/// every connected page.
///
/// The ledger lock is held from mutation until the resulting events are
/// queued, so all clients see updates in the same order they were applied.
pub struct CallBoard {
    ledger: Mutex<StatsLedger>,
    client_manager: ClientManager,
    admin_token: Option<String>,
}

impl CallBoard {
    /// Create new call board.
    ///
    /// A blank `admin_token` counts as unset, which disables admin reset.
    pub fn new(admin_token: Option<String>) -> Self {
        let admin_token = admin_token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Self {
            ledger: Mutex::new(StatsLedger::new()),
            client_manager: ClientManager::new(),
            admin_token,
        }
    }

    /// Register a new page and queue the current snapshot as its first frame
    pub async fn connect(&self) -> Result<(ClientId, ClientReceiver)> {
        let ledger = self.ledger.lock().await;

        let (client, rx) = self.client_manager.create_client();
        let id = client.id();
        client.send_event(&BroadcastEvent::StatsUpdate(ledger.snapshot()))?;
        self.client_manager.add_client(client).await;

        Ok((id, rx))
    }

    /// Forget a page
    pub async fn disconnect(&self, id: ClientId) {
        self.client_manager.remove_client(id).await;
    }

    /// Record a submitted name and broadcast it.
    ///
    /// Returns false (and broadcasts nothing) when the name is blank.
    pub async fn submit(&self, name: &str) -> Result<bool> {
        let mut ledger = self.ledger.lock().await;

        let Some(nome) = ledger.accept_submission(name) else {
            tracing::debug!("Ignoring blank submission");
            return Ok(false);
        };

        tracing::info!("New arrival: {} (total: {})", nome, ledger.total());

        let snapshot = ledger.snapshot();
        self.client_manager
            .broadcast(&BroadcastEvent::NewArrival { nome })
            .await?;
        self.client_manager
            .broadcast(&BroadcastEvent::StatsUpdate(snapshot))
            .await?;

        Ok(true)
    }

    /// Zero the ledger if `provided` matches the configured admin token
    pub async fn admin_reset(&self, provided: Option<&str>) -> Result<()> {
        let provided = provided.map(str::trim).unwrap_or_default();

        match &self.admin_token {
            Some(expected) if !provided.is_empty() && provided == expected => {}
            Some(_) => {
                tracing::warn!("Admin reset rejected: token mismatch");
                return Err(BroadcasterError::Unauthorized);
            }
            None => {
                tracing::warn!("Admin reset rejected: no admin token configured");
                return Err(BroadcasterError::Unauthorized);
            }
        }

        let mut ledger = self.ledger.lock().await;
        ledger.reset();
        tracing::info!("Stats reset by admin");

        self.client_manager
            .broadcast(&BroadcastEvent::StatsUpdate(ledger.snapshot()))
            .await?;

        Ok(())
    }

    /// Current stats snapshot
    pub async fn snapshot(&self) -> StatsSnapshot {
        self.ledger.lock().await.snapshot()
    }

    /// Whether admin reset can ever succeed
    pub fn admin_reset_enabled(&self) -> bool {
        self.admin_token.is_some()
    }

    /// Get current client count
    pub async fn client_count(&self) -> usize {
        self.client_manager.client_count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_board_create() {
        let board = CallBoard::new(None);
        assert_eq!(board.client_count().await, 0);
        assert!(board.snapshot().await.is_empty());
        assert!(!board.admin_reset_enabled());
    }

    #[tokio::test]
    async fn test_blank_admin_token_disables_reset() {
        let board = CallBoard::new(Some("   ".to_string()));
        assert!(!board.admin_reset_enabled());
        assert!(matches!(
            board.admin_reset(Some("   ")).await,
            Err(BroadcasterError::Unauthorized)
        ));
        assert!(matches!(
            board.admin_reset(Some("")).await,
            Err(BroadcasterError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_admin_token_is_trimmed() {
        let board = CallBoard::new(Some(" s3cret ".to_string()));
        board.submit("Ana").await.unwrap();

        board.admin_reset(Some("s3cret ")).await.unwrap();
        assert!(board.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_submit_blank_returns_false() {
        let board = CallBoard::new(None);
        assert!(!board.submit("  ").await.unwrap());
        assert!(board.submit("Ana").await.unwrap());
        assert_eq!(board.snapshot().await.total, 1);
    }
}
