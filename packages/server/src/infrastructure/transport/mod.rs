//! Transport adapters implementing the domain's `GroupTransport` capability.

mod hub;

pub use hub::{InMemoryGroupHub, OUTBOUND_BUFFER};
