//! In-memory group hub.
//!
//! Holds one outbound channel per live socket and the room groups those
//! sockets were added to. Sending never awaits a recipient: each delivery is
//! a `try_send` onto a bounded channel, so a slow or closed socket cannot
//! hold up the rest of its group. A socket whose queue is full loses that
//! event.

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc::{Sender, error::TrySendError};

use crate::{
    domain::{ConnectionId, GroupTransport, OutboundEvent, RoomName},
    infrastructure::dto::websocket::ServerMessage,
};

/// Capacity of each socket's outbound queue.
pub const OUTBOUND_BUFFER: usize = 256;

/// Outbound channels and room groups of every live connection.
#[derive(Default)]
pub struct InMemoryGroupHub {
    connections: DashMap<ConnectionId, Sender<String>>,
    groups: DashMap<RoomName, HashSet<ConnectionId>>,
}

impl InMemoryGroupHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the outbound channel of a freshly accepted socket.
    pub fn register(&self, connection_id: ConnectionId, sender: Sender<String>) {
        self.connections.insert(connection_id, sender);
    }

    /// Drop the socket's channel and every group membership it had.
    ///
    /// Only the transport's own state is touched here; the membership
    /// registry is left alone.
    pub fn unregister(&self, connection_id: &ConnectionId) {
        self.connections.remove(connection_id);
        self.groups.retain(|_, members| {
            members.remove(connection_id);
            !members.is_empty()
        });
    }

    /// Current members of a room group, sorted.
    pub fn group_members(&self, room: &RoomName) -> Vec<ConnectionId> {
        let mut members: Vec<ConnectionId> = self
            .groups
            .get(room)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default();
        members.sort();
        members
    }

    /// Number of live sockets.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    fn encode(event: OutboundEvent) -> Option<String> {
        match serde_json::to_string(&ServerMessage::from(event)) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!("Failed to encode outbound event: {}", e);
                None
            }
        }
    }

    fn deliver(&self, connection_id: &ConnectionId, payload: &str) {
        let Some(sender) = self
            .connections
            .get(connection_id)
            .map(|entry| entry.value().clone())
        else {
            tracing::debug!("Connection '{}' has no open channel", connection_id);
            return;
        };
        match sender.try_send(payload.to_string()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    "Outbound queue of connection '{}' is full, dropping event",
                    connection_id
                );
            }
            Err(TrySendError::Closed(_)) => {
                tracing::warn!("Failed to deliver event to connection '{}'", connection_id);
            }
        }
    }
}

#[async_trait]
impl GroupTransport for InMemoryGroupHub {
    async fn add_to_group(&self, connection_id: &ConnectionId, room: &RoomName) {
        self.groups
            .entry(room.clone())
            .or_default()
            .insert(connection_id.clone());
    }

    async fn remove_from_group(&self, connection_id: &ConnectionId, room: &RoomName) {
        // The shard guard must be released before remove_if touches it again.
        if let Some(mut members) = self.groups.get_mut(room) {
            members.remove(connection_id);
        }
        self.groups.remove_if(room, |_, members| members.is_empty());
    }

    async fn send_to_group(&self, room: &RoomName, event: OutboundEvent) {
        let targets = self.group_members(room);
        if targets.is_empty() {
            return;
        }
        let name = event.name();
        let Some(payload) = Self::encode(event) else {
            return;
        };
        for target in &targets {
            self.deliver(target, &payload);
        }
        tracing::debug!("Sent {} to {} member(s) of '{}'", name, targets.len(), room);
    }

    async fn send_to_all(&self, event: OutboundEvent) {
        let name = event.name();
        let Some(payload) = Self::encode(event) else {
            return;
        };
        let targets: Vec<ConnectionId> = self
            .connections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        for target in &targets {
            self.deliver(target, &payload);
        }
        tracing::debug!("Sent {} to all {} connection(s)", name, targets.len());
    }
}
