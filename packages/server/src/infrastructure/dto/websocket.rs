//! WebSocket message DTOs.
//!
//! Frames are JSON objects tagged by `type`, named after the hub events
//! the browser client invokes and listens for.

use serde::{Deserialize, Serialize};

use crate::domain::{Command, MessageContent, OutboundEvent, RoomName, Username, ValueObjectError};

/// Message sent by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    JoinChat {
        username: String,
    },
    JoinSpecificChatRoom {
        username: String,
        #[serde(rename = "chatRoom", alias = "room")]
        chat_room: String,
    },
    LeaveSpecificChatRoom {
        username: String,
        #[serde(rename = "chatRoom", alias = "room")]
        chat_room: String,
    },
    SendMessage {
        message: String,
    },
}

impl TryFrom<ClientMessage> for Command {
    type Error = ValueObjectError;

    fn try_from(message: ClientMessage) -> Result<Self, Self::Error> {
        let command = match message {
            ClientMessage::JoinChat { username } => Command::Join {
                username: Username::new(username),
            },
            ClientMessage::JoinSpecificChatRoom {
                username,
                chat_room,
            } => Command::JoinRoom {
                username: Username::new(username),
                room: RoomName::new(chat_room)?,
            },
            ClientMessage::LeaveSpecificChatRoom {
                username,
                chat_room,
            } => Command::LeaveRoom {
                username: Username::new(username),
                room: RoomName::new(chat_room)?,
            },
            ClientMessage::SendMessage { message } => Command::Send {
                message: MessageContent::new(message)?,
            },
        };
        Ok(command)
    }
}

/// Message pushed to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    ReceiveMessage { author: String, text: String },
    ReceiveSpecificMessage { author: String, text: String },
}

impl From<OutboundEvent> for ServerMessage {
    fn from(event: OutboundEvent) -> Self {
        match event {
            OutboundEvent::ReceiveMessage { author, text } => Self::ReceiveMessage { author, text },
            OutboundEvent::ReceiveSpecificMessage { author, text } => {
                Self::ReceiveSpecificMessage { author, text }
            }
        }
    }
}
