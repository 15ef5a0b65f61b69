//! Core domain models for room membership.

use serde::{Deserialize, Serialize};

use super::value_object::{RoomName, Timestamp, Username};

/// Membership record of one live connection.
///
/// A connection belongs to at most one room at a time. A later join replaces
/// the whole record rather than merging into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    /// Display name given at join time
    pub username: Username,
    /// Room the connection currently belongs to
    pub room: RoomName,
    /// Timestamp when the record was written
    pub joined_at: Timestamp,
}

impl ConnectionRecord {
    /// Create a new membership record
    pub fn new(username: Username, room: RoomName, joined_at: Timestamp) -> Self {
        Self {
            username,
            room,
            joined_at,
        }
    }

    /// Whether this record places the connection in `room`
    pub fn is_in(&self, room: &RoomName) -> bool {
        &self.room == room
    }
}
