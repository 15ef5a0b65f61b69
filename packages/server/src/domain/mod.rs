//! Domain layer for the room broadcast server.
//!
//! This module contains business types and the capabilities the use cases
//! depend on, independent of DTOs and infrastructure concerns.

pub mod command;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod repository;
pub mod transport;
pub mod value_object;

pub use command::Command;
pub use entity::ConnectionRecord;
pub use error::ValueObjectError;
pub use event::{OutboundEvent, SYSTEM_AUTHOR};
pub use factory::ConnectionIdFactory;
pub use repository::ConnectionRepository;
pub use transport::GroupTransport;
pub use value_object::{ConnectionId, MessageContent, RoomName, Timestamp, Username};

#[cfg(test)]
pub use repository::MockConnectionRepository;
#[cfg(test)]
pub use transport::MockGroupTransport;
