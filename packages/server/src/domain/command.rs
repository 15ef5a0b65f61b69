//! Inbound commands, one variant per client event.

use super::value_object::{MessageContent, RoomName, Username};

/// Every event a client can send. Dispatch is an exhaustive match over this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Announce a user to every connected client
    Join { username: Username },
    /// Enter a room
    JoinRoom { username: Username, room: RoomName },
    /// Leave a room; `username` is used for the departure notice as supplied
    LeaveRoom { username: Username, room: RoomName },
    /// Send chat text to the sender's current room
    Send { message: MessageContent },
}
