//! WebSocket transport for the call board
//!
//! Each upgraded socket becomes one board client. A single task per socket
//! forwards queued board frames out and feeds inbound frames to the board.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use lousa_broadcaster::{CallBoard, ClientId, ClientMessage};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::state::AppState;

/// Handles WebSocket upgrade requests to `/ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.board))
}

async fn handle_socket(socket: WebSocket, board: Arc<CallBoard>) {
    let (id, mut frames) = match board.connect().await {
        Ok(client) => client,
        Err(e) => {
            warn!("Failed to register WebSocket client: {}", e);
            return;
        }
    };

    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            frame = frames.recv() => {
                match frame {
                    Some(text) => {
                        if sender.send(Message::Text(text)).await.is_err() {
                            debug!("Client {} went away while sending", id);
                            break;
                        }
                    }
                    // board dropped this client (stalled queue)
                    None => break,
                }
            }

            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => handle_client_text(&board, id, &text).await,
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        debug!("Client {} socket error: {}", id, e);
                        break;
                    }
                    // axum answers pings itself
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    board.disconnect(id).await;
}

async fn handle_client_text(board: &CallBoard, id: ClientId, text: &str) {
    match ClientMessage::parse(text) {
        Ok(ClientMessage::Submit { nome }) => {
            if let Err(e) = board.submit(&nome).await {
                warn!("Failed to broadcast submission from client {}: {}", id, e);
            }
        }
        Ok(ClientMessage::Unknown(event)) => {
            debug!("Ignoring event '{}' from client {}", event, id);
        }
        Err(e) => {
            debug!("Unparseable frame from client {}: {}", id, e);
        }
    }
}
