//! UseCase: 切断時の Registry 掃除
//!
//! 明示的な退室なしにソケットが閉じた場合に、Registry に残ったレコードを
//! 削除して元のルームに退室通知を送ります。サーバーが
//! `--evict-on-disconnect` 付きで起動されたときだけ呼ばれます。
//! 既定ではレコードは残ったままになります。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRecord, ConnectionRepository, GroupTransport, OutboundEvent};

/// Result of a disconnect cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectOutcome {
    /// A stale record was removed and its room notified
    Evicted(ConnectionRecord),
    /// The connection had already left (or never joined)
    NotRegistered,
}

/// 切断処理のユースケース
pub struct DisconnectConnectionUseCase {
    repository: Arc<dyn ConnectionRepository>,
    transport: Arc<dyn GroupTransport>,
}

impl DisconnectConnectionUseCase {
    /// 新しい DisconnectConnectionUseCase を作成
    pub fn new(
        repository: Arc<dyn ConnectionRepository>,
        transport: Arc<dyn GroupTransport>,
    ) -> Self {
        Self {
            repository,
            transport,
        }
    }

    /// 切断処理を実行
    ///
    /// Unlike an explicit leave, the notice uses the stored username and room,
    /// since the closed socket supplies neither.
    pub async fn execute(&self, connection_id: ConnectionId) -> DisconnectOutcome {
        let Some(record) = self.repository.remove(&connection_id).await else {
            return DisconnectOutcome::NotRegistered;
        };

        self.transport
            .remove_from_group(&connection_id, &record.room)
            .await;
        self.transport
            .send_to_group(&record.room, OutboundEvent::left(&record.username))
            .await;

        tracing::info!(
            "Evicted '{}' ({}) from room '{}' on disconnect",
            connection_id,
            record.username,
            record.room
        );

        DisconnectOutcome::Evicted(record)
    }
}
