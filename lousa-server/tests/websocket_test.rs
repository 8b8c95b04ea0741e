//! End-to-end tests of the real-time channel over a real listener

use futures::{SinkExt, StreamExt};
use lousa_server::{server, AppState, ServerConfig};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start_server() -> (SocketAddr, AppState) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::new(ServerConfig::default());

    let serve_state = state.clone();
    tokio::spawn(async move {
        server::serve(listener, serve_state, std::future::pending())
            .await
            .unwrap();
    });

    (addr, state)
}

async fn connect(addr: SocketAddr) -> Socket {
    let (socket, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    socket
}

/// Next JSON event, skipping non-text frames
async fn next_event(socket: &mut Socket) -> serde_json::Value {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(2), socket.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("socket closed")
            .unwrap();
        if let Message::Text(text) = msg {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

async fn submit(socket: &mut Socket, nome: &str) {
    let frame = serde_json::json!({"event": "novo_responsavel", "data": {"nome": nome}});
    socket.send(Message::Text(frame.to_string())).await.unwrap();
}

#[tokio::test]
async fn test_connect_receives_stats() {
    let (addr, state) = start_server().await;
    state.board.submit("Ana").await.unwrap();

    let mut socket = connect(addr).await;
    let event = next_event(&mut socket).await;

    assert_eq!(event["event"], "stats_update");
    assert_eq!(event["data"]["total"], 1);
    assert_eq!(event["data"]["recent"], serde_json::json!(["Ana"]));
}

#[tokio::test]
async fn test_submission_reaches_every_display() {
    let (addr, state) = start_server().await;

    let mut phone = connect(addr).await;
    let mut display = connect(addr).await;
    next_event(&mut phone).await;
    next_event(&mut display).await;

    submit(&mut phone, "  Ana  ").await;

    for socket in [&mut display, &mut phone] {
        let arrival = next_event(socket).await;
        assert_eq!(arrival["event"], "atualizar_lousa");
        assert_eq!(arrival["data"]["nome"], "Ana");

        let stats = next_event(socket).await;
        assert_eq!(stats["event"], "stats_update");
        assert_eq!(stats["data"]["total"], 1);
        assert_eq!(stats["data"]["top"][0]["qtd"], 1);
    }

    assert_eq!(state.board.snapshot().await.total, 1);
}

#[tokio::test]
async fn test_blank_and_unknown_frames_are_ignored() {
    let (addr, state) = start_server().await;
    let mut socket = connect(addr).await;
    next_event(&mut socket).await;

    submit(&mut socket, "   ").await;
    socket
        .send(Message::Text(r#"{"event":"ping"}"#.to_string()))
        .await
        .unwrap();
    socket.send(Message::Text("garbage".to_string())).await.unwrap();
    submit(&mut socket, "Bia").await;

    // the first frame after the noise belongs to Bia
    let arrival = next_event(&mut socket).await;
    assert_eq!(arrival["data"]["nome"], "Bia");
    assert_eq!(state.board.snapshot().await.total, 1);
}

#[tokio::test]
async fn test_closed_socket_is_unregistered() {
    let (addr, state) = start_server().await;

    let mut gone = connect(addr).await;
    let mut live = connect(addr).await;
    next_event(&mut gone).await;
    next_event(&mut live).await;
    assert_eq!(state.board.client_count().await, 2);

    gone.close(None).await.unwrap();
    drop(gone);

    // give the server task a moment to notice the close
    for _ in 0..50 {
        if state.board.client_count().await == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(state.board.client_count().await, 1);

    state.board.submit("Caio").await.unwrap();
    let arrival = next_event(&mut live).await;
    assert_eq!(arrival["data"]["nome"], "Caio");
}
