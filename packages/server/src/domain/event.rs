//! Outbound events emitted to clients.

use super::value_object::{MessageContent, Username};

/// Author name used for notices generated by the server itself.
pub const SYSTEM_AUTHOR: &str = "admin";

/// The closed outbound vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// System or global notice
    ReceiveMessage { author: String, text: String },
    /// Room-scoped chat content
    ReceiveSpecificMessage { author: String, text: String },
}

impl OutboundEvent {
    /// "`<username>` has joined the chat", authored by the system.
    pub fn joined(username: &Username) -> Self {
        Self::ReceiveMessage {
            author: SYSTEM_AUTHOR.to_string(),
            text: format!("{username} has joined the chat"),
        }
    }

    /// "`<username>` has left the chat", authored by the system.
    pub fn left(username: &Username) -> Self {
        Self::ReceiveMessage {
            author: SYSTEM_AUTHOR.to_string(),
            text: format!("{username} has left the chat"),
        }
    }

    /// Chat content sent by `username` to its room.
    pub fn chat(username: &Username, content: MessageContent) -> Self {
        Self::ReceiveSpecificMessage {
            author: username.as_str().to_string(),
            text: content.into_string(),
        }
    }

    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReceiveMessage { .. } => "ReceiveMessage",
            Self::ReceiveSpecificMessage { .. } => "ReceiveSpecificMessage",
        }
    }
}
