//! Connection registry abstraction.
//!
//! The use cases depend on this trait, and the infrastructure layer provides
//! the implementation (dependency inversion).

use async_trait::async_trait;

use super::{entity::ConnectionRecord, value_object::ConnectionId};

/// Concurrency-safe store of `ConnectionId -> ConnectionRecord`.
///
/// Every operation is linearizable with respect to the others. Callers never
/// lock anything themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Insert or overwrite the record, returning the one it replaced.
    async fn put(
        &self,
        connection_id: ConnectionId,
        record: ConnectionRecord,
    ) -> Option<ConnectionRecord>;

    /// Look up a record. Absence is a normal outcome.
    async fn get(&self, connection_id: &ConnectionId) -> Option<ConnectionRecord>;

    /// Atomically remove and return the record, if any.
    async fn remove(&self, connection_id: &ConnectionId) -> Option<ConnectionRecord>;

    /// Number of registered connections.
    async fn count(&self) -> usize;

    /// Point-in-time copy of every entry, in no particular order.
    async fn snapshot(&self) -> Vec<(ConnectionId, ConnectionRecord)>;
}
