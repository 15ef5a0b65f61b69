//! Group addressing capability provided by the transport layer.

use async_trait::async_trait;

use super::{
    event::OutboundEvent,
    value_object::{ConnectionId, RoomName},
};

/// Fire-and-forget group addressing.
///
/// None of the methods report delivery: a failed or slow recipient is the
/// transport's concern and must never hold up the others.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupTransport: Send + Sync {
    async fn add_to_group(&self, connection_id: &ConnectionId, room: &RoomName);

    async fn remove_from_group(&self, connection_id: &ConnectionId, room: &RoomName);

    /// Deliver `event` to every connection currently in `room`.
    async fn send_to_group(&self, room: &RoomName, event: OutboundEvent);

    /// Deliver `event` to every live connection regardless of room.
    async fn send_to_all(&self, event: OutboundEvent);
}
