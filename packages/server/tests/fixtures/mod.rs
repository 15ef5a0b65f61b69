//! In-process test server and WebSocket client helpers.

#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use roomcast_server::{serve, ui::state::AppState};
use serde_json::{Value, json};
use tokio::{net::TcpListener, net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

/// How long to wait for a frame that is expected to arrive.
const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to wait before concluding that no frame is coming.
const QUIET_PERIOD: Duration = Duration::from_millis(200);

/// Server running on an ephemeral port; stopped on drop.
pub struct TestServer {
    addr: String,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(false).await
    }

    pub async fn start_with(evict_on_disconnect: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener
            .local_addr()
            .expect("Failed to read local address")
            .to_string();
        let state = Arc::new(AppState::new(evict_on_disconnect));
        let handle = tokio::spawn(async move {
            serve(listener, state).await.expect("Server failed");
        });
        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Minimal chat client speaking the JSON frame protocol.
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        Self { stream }
    }

    pub async fn send(&mut self, frame: Value) {
        self.stream
            .send(Message::text(frame.to_string()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn join_chat(&mut self, username: &str) {
        self.send(json!({"type": "JoinChat", "username": username}))
            .await;
    }

    pub async fn join_room(&mut self, username: &str, room: &str) {
        self.send(json!({"type": "JoinSpecificChatRoom", "username": username, "chatRoom": room}))
            .await;
    }

    pub async fn leave_room(&mut self, username: &str, room: &str) {
        self.send(json!({"type": "LeaveSpecificChatRoom", "username": username, "chatRoom": room}))
            .await;
    }

    pub async fn send_message(&mut self, message: &str) {
        self.send(json!({"type": "SendMessage", "message": message}))
            .await;
    }

    /// Next JSON frame, panicking if none arrives in time.
    pub async fn recv(&mut self) -> Value {
        self.try_recv(RECV_TIMEOUT)
            .await
            .expect("Timed out waiting for a frame")
    }

    /// Assert that nothing arrives during the quiet period.
    pub async fn expect_silence(&mut self) {
        if let Some(frame) = self.try_recv(QUIET_PERIOD).await {
            panic!("Unexpected frame: {frame}");
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }

    async fn try_recv(&mut self, wait: Duration) -> Option<Value> {
        loop {
            let next = tokio::time::timeout(wait, self.stream.next()).await.ok()??;
            match next.expect("WebSocket error") {
                Message::Text(text) => {
                    return Some(serde_json::from_str(text.as_str()).expect("Invalid JSON frame"));
                }
                Message::Close(_) => return None,
                _ => continue,
            }
        }
    }
}

pub fn notice(text: &str) -> Value {
    json!({"type": "ReceiveMessage", "author": "admin", "text": text})
}

pub fn chat(author: &str, text: &str) -> Value {
    json!({"type": "ReceiveSpecificMessage", "author": author, "text": text})
}
