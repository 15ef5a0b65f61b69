//! In-memory repository implementations.

mod connection;

pub use connection::InMemoryConnectionRepository;
