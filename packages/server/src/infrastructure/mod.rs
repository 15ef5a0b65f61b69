//! Infrastructure layer: in-memory registry, in-memory transport hub, wire DTOs.

pub mod dto;
pub mod repository;
pub mod transport;
