//! UseCase: メッセージ送信処理
//!
//! 送信者のルームは Registry から解決します。未登録の送信者からの
//! メッセージは誰にも届けず、エラーも返しません。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, ConnectionRepository, GroupTransport, MessageContent, OutboundEvent, RoomName,
};

/// Result of a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Broadcast to the sender's room
    Delivered { room: RoomName },
    /// The sender is not in any room; nothing was sent
    SenderNotRegistered,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    repository: Arc<dyn ConnectionRepository>,
    transport: Arc<dyn GroupTransport>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn ConnectionRepository>,
        transport: Arc<dyn GroupTransport>,
    ) -> Self {
        Self {
            repository,
            transport,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信者の接続 ID
    /// * `content` - メッセージ内容
    pub async fn execute(&self, connection_id: ConnectionId, content: MessageContent) -> SendOutcome {
        let Some(sender) = self.repository.get(&connection_id).await else {
            tracing::debug!(
                "Dropping message from unregistered connection '{}'",
                connection_id
            );
            return SendOutcome::SenderNotRegistered;
        };

        self.transport
            .send_to_group(&sender.room, OutboundEvent::chat(&sender.username, content))
            .await;

        tracing::info!(
            "Broadcast message from '{}' ({}) to room '{}'",
            sender.username,
            connection_id,
            sender.room
        );

        SendOutcome::Delivered { room: sender.room }
    }
}
