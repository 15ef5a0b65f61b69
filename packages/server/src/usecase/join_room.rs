//! UseCase: ルーム入室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - グループ追加 → Registry 書き込み → 入室通知 の順序
//!
//! ### なぜこのテストが必要か
//! - Registry とトランスポートのグループ所属を揃えて保つ必要がある
//! - 再入室（別ルーム）の際に旧ルームへの送信が残らないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回入室
//! - エッジケース：同じ接続での別ルームへの再入室（退室通知なし）
//! - エッジケース：同じルームへの再入室

use std::sync::Arc;

use roomcast_shared::time::get_jst_timestamp;

use crate::domain::{
    ConnectionId, ConnectionRecord, ConnectionRepository, GroupTransport, OutboundEvent, RoomName,
    Timestamp, Username,
};

/// Result of a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The connection had no record before
    Joined,
    /// An earlier record was overwritten
    Rejoined { previous_room: RoomName },
}

/// ルーム入室のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn ConnectionRepository>,
    transport: Arc<dyn GroupTransport>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn ConnectionRepository>,
        transport: Arc<dyn GroupTransport>,
    ) -> Self {
        Self {
            repository,
            transport,
        }
    }

    /// ルーム入室を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 入室する接続の ID
    /// * `username` - 表示名（一意性は検証しない）
    /// * `room` - 入室先ルーム
    ///
    /// The prior record, if any, is overwritten without a departure notice.
    /// When it named another room, the connection is also taken out of that
    /// room's group so it stops receiving its traffic.
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        username: Username,
        room: RoomName,
    ) -> JoinOutcome {
        // 1. トランスポートのグループに追加
        self.transport.add_to_group(&connection_id, &room).await;

        // 2. Registry に書き込み（既存レコードは上書き）
        let record = ConnectionRecord::new(
            username.clone(),
            room.clone(),
            Timestamp::new(get_jst_timestamp()),
        );
        let previous = self.repository.put(connection_id.clone(), record).await;

        let outcome = match previous {
            None => JoinOutcome::Joined,
            Some(previous) => {
                if !previous.is_in(&room) {
                    self.transport
                        .remove_from_group(&connection_id, &previous.room)
                        .await;
                }
                JoinOutcome::Rejoined {
                    previous_room: previous.room,
                }
            }
        };

        // 3. ルーム内に入室通知
        self.transport
            .send_to_group(&room, OutboundEvent::joined(&username))
            .await;

        tracing::info!(
            "Connection '{}' joined room '{}' as '{}'",
            connection_id,
            room,
            username
        );

        outcome
    }
}
