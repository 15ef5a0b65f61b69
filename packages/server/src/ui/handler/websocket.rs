//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{Command, ConnectionId, ConnectionIdFactory},
    infrastructure::{dto::websocket::ClientMessage, transport::OUTBOUND_BUFFER},
    ui::state::AppState,
    usecase::DisconnectOutcome,
};

/// Upper bound on one inbound frame; field values themselves are not capped.
const MAX_FRAME_SIZE: usize = 64 * 1024;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, StatusCode> {
    let connection_id = match ConnectionIdFactory::generate() {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to assign connection id: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Ok(ws
        .max_message_size(MAX_FRAME_SIZE)
        .on_upgrade(move |socket| handle_socket(socket, state, connection_id)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (mut sender, mut receiver) = socket.split();

    // Outbound events for this socket are pushed here by the hub
    let (tx, mut rx) = mpsc::channel::<String>(OUTBOUND_BUFFER);
    state.hub.register(connection_id.clone(), tx);
    tracing::info!("Connection '{}' opened", connection_id);

    let recv_state = state.clone();
    let recv_id = connection_id.clone();

    // Commands from one socket are handled in order; sockets run concurrently
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", recv_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let Some(command) = parse_command(&recv_id, text.as_str()) else {
                        continue;
                    };
                    let outcome = recv_state.chat.dispatch(recv_id.clone(), command).await;
                    tracing::debug!("Connection '{}' -> {:?}", recv_id, outcome);
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_id);
                    break;
                }
                _ => {}
            }
        }
    });

    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    stop_when_either_finishes(recv_task, send_task).await;

    state.hub.unregister(&connection_id);

    if state.evict_on_disconnect {
        if let DisconnectOutcome::Evicted(record) = state.chat.disconnect(connection_id.clone()).await {
            tracing::info!(
                "Removed stale membership of '{}' in '{}'",
                connection_id,
                record.room
            );
        }
    } else if state.repository.get(&connection_id).await.is_some() {
        tracing::debug!(
            "Connection '{}' closed without leaving; its membership record is kept",
            connection_id
        );
    }

    tracing::info!("Connection '{}' closed", connection_id);
}

/// Wait until one task completes, then abort the other and wait for it to
/// stop as well. An in-flight join must not re-add the connection to a group
/// after the caller unregisters it.
async fn stop_when_either_finishes(mut recv_task: JoinHandle<()>, mut send_task: JoinHandle<()>) {
    let recv_finished = tokio::select! {
        _ = &mut recv_task => true,
        _ = &mut send_task => false,
    };
    let remaining = if recv_finished { send_task } else { recv_task };
    remaining.abort();
    let _ = remaining.await;
}

/// Decode a text frame into a command. Malformed frames are logged and dropped.
fn parse_command(connection_id: &ConnectionId, text: &str) -> Option<Command> {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Ignoring malformed frame from '{}': {}", connection_id, e);
            return None;
        }
    };

    match Command::try_from(message) {
        Ok(command) => Some(command),
        Err(e) => {
            tracing::warn!("Ignoring invalid payload from '{}': {}", connection_id, e);
            None
        }
    }
}
