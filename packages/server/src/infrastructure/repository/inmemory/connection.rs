//! InMemory Connection Repository 実装
//!
//! ドメイン層が定義する ConnectionRepository trait の具体的な実装。
//! DashMap をインメモリ DB として使用します。
//!
//! DashMap はキーごとのシャードロックで操作するため、同一キーに対する
//! put / get / remove は互いに線形化可能です。複数キーをまたぐ操作はありません。

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{ConnectionId, ConnectionRecord, ConnectionRepository};

/// インメモリ Connection Repository 実装
#[derive(Default)]
pub struct InMemoryConnectionRepository {
    /// connection id -> membership record
    connections: DashMap<ConnectionId, ConnectionRecord>,
}

impl InMemoryConnectionRepository {
    /// 新しい InMemoryConnectionRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn put(
        &self,
        connection_id: ConnectionId,
        record: ConnectionRecord,
    ) -> Option<ConnectionRecord> {
        self.connections.insert(connection_id, record)
    }

    async fn get(&self, connection_id: &ConnectionId) -> Option<ConnectionRecord> {
        self.connections
            .get(connection_id)
            .map(|entry| entry.value().clone())
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Option<ConnectionRecord> {
        self.connections
            .remove(connection_id)
            .map(|(_, record)| record)
    }

    async fn count(&self) -> usize {
        self.connections.len()
    }

    async fn snapshot(&self) -> Vec<(ConnectionId, ConnectionRecord)> {
        self.connections
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}
