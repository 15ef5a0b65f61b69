//! UseCase: 全体への参加通知

use std::sync::Arc;

use crate::domain::{GroupTransport, OutboundEvent, Username};

/// 全接続への参加アナウンスのユースケース
///
/// Registry には触れません。
pub struct AnnounceGlobalUseCase {
    transport: Arc<dyn GroupTransport>,
}

impl AnnounceGlobalUseCase {
    pub fn new(transport: Arc<dyn GroupTransport>) -> Self {
        Self { transport }
    }

    /// "`<username>` has joined the chat" を全接続に送信
    pub async fn execute(&self, username: Username) {
        self.transport
            .send_to_all(OutboundEvent::joined(&username))
            .await;
        tracing::info!("Announced '{}' to all connections", username);
    }
}
