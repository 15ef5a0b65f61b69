//! UseCase: ルーム退室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 登録済みの場合のみ退室通知が送られること
//!
//! ### なぜこのテストが必要か
//! - 二重退室や未入室での退室で通知が重複しないことを保証
//! - 通知には呼び出し側が渡した名前・ルームが使われる（保存値ではない）
//!
//! ### どのような状況を想定しているか
//! - 正常系：入室済み接続の退室
//! - エッジケース：二重退室、未入室での退室

use std::sync::Arc;

use crate::domain::{
    ConnectionId, ConnectionRecord, ConnectionRepository, GroupTransport, OutboundEvent, RoomName,
    Username,
};

/// Result of a leave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// The stored record that was removed
    Left(ConnectionRecord),
    /// Nothing was registered; no notice was sent
    NotRegistered,
}

/// ルーム退室のユースケース
pub struct LeaveRoomUseCase {
    repository: Arc<dyn ConnectionRepository>,
    transport: Arc<dyn GroupTransport>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn ConnectionRepository>,
        transport: Arc<dyn GroupTransport>,
    ) -> Self {
        Self {
            repository,
            transport,
        }
    }

    /// ルーム退室を実行
    ///
    /// The departure notice names `username` and goes to `room` exactly as
    /// supplied by the caller, even if the stored record differs.
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        username: Username,
        room: RoomName,
    ) -> LeaveOutcome {
        // 1. トランスポートのグループから外す
        self.transport.remove_from_group(&connection_id, &room).await;

        // 2. Registry から削除（登録されていたかを判定）
        let Some(removed) = self.repository.remove(&connection_id).await else {
            tracing::debug!(
                "Connection '{}' left '{}' without being registered",
                connection_id,
                room
            );
            return LeaveOutcome::NotRegistered;
        };

        // 3. 残りのメンバーに退室通知
        self.transport
            .send_to_group(&room, OutboundEvent::left(&username))
            .await;

        tracing::info!(
            "Connection '{}' ({}) left room '{}'",
            connection_id,
            removed.username,
            room
        );

        LeaveOutcome::Left(removed)
    }
}
