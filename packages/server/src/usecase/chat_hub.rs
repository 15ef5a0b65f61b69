//! Command dispatcher.
//!
//! Routes every inbound `Command` to its use case through a single
//! exhaustive match. Every command acts on behalf of the calling connection
//! only, so one client can never change another client's membership.

use std::sync::Arc;

use crate::domain::{Command, ConnectionId, ConnectionRepository, GroupTransport};

use super::{
    AnnounceGlobalUseCase, DisconnectConnectionUseCase, DisconnectOutcome, JoinOutcome,
    JoinRoomUseCase, LeaveOutcome, LeaveRoomUseCase, SendMessageUseCase, SendOutcome,
};

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Announced,
    Joined(JoinOutcome),
    Left(LeaveOutcome),
    Sent(SendOutcome),
}

/// Entry point for inbound client events.
#[derive(Clone)]
pub struct ChatHub {
    repository: Arc<dyn ConnectionRepository>,
    transport: Arc<dyn GroupTransport>,
}

impl ChatHub {
    pub fn new(
        repository: Arc<dyn ConnectionRepository>,
        transport: Arc<dyn GroupTransport>,
    ) -> Self {
        Self {
            repository,
            transport,
        }
    }

    /// Handle one command issued by `connection_id`.
    pub async fn dispatch(&self, connection_id: ConnectionId, command: Command) -> DispatchOutcome {
        match command {
            Command::Join { username } => {
                AnnounceGlobalUseCase::new(self.transport.clone())
                    .execute(username)
                    .await;
                DispatchOutcome::Announced
            }
            Command::JoinRoom { username, room } => {
                let outcome = JoinRoomUseCase::new(self.repository.clone(), self.transport.clone())
                    .execute(connection_id, username, room)
                    .await;
                DispatchOutcome::Joined(outcome)
            }
            Command::LeaveRoom { username, room } => {
                let outcome =
                    LeaveRoomUseCase::new(self.repository.clone(), self.transport.clone())
                        .execute(connection_id, username, room)
                        .await;
                DispatchOutcome::Left(outcome)
            }
            Command::Send { message } => {
                let outcome =
                    SendMessageUseCase::new(self.repository.clone(), self.transport.clone())
                        .execute(connection_id, message)
                        .await;
                DispatchOutcome::Sent(outcome)
            }
        }
    }

    /// Drop the registry entry of a closed connection.
    pub async fn disconnect(&self, connection_id: ConnectionId) -> DisconnectOutcome {
        DisconnectConnectionUseCase::new(self.repository.clone(), self.transport.clone())
            .execute(connection_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessageContent, RoomName, Username},
        infrastructure::{
            dto::websocket::ServerMessage, repository::InMemoryConnectionRepository,
            transport::{InMemoryGroupHub, OUTBOUND_BUFFER},
        },
    };
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - ChatHub 経由の入室 → 送信 → 退室 の一連の流れ
    // - 並行入室でメンバーが欠けたり重複したりしないこと
    // ========================================

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn user(name: &str) -> Username {
        Username::new(name.to_string())
    }

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    fn drain(rx: &mut mpsc::Receiver<String>) -> Vec<ServerMessage> {
        let mut messages = Vec::new();
        while let Ok(raw) = rx.try_recv() {
            messages.push(serde_json::from_str(&raw).unwrap());
        }
        messages
    }

    fn notice(text: &str) -> ServerMessage {
        ServerMessage::ReceiveMessage {
            author: "admin".to_string(),
            text: text.to_string(),
        }
    }

    fn setup() -> (ChatHub, Arc<InMemoryConnectionRepository>, Arc<InMemoryGroupHub>) {
        let repository = Arc::new(InMemoryConnectionRepository::new());
        let hub = Arc::new(InMemoryGroupHub::new());
        (
            ChatHub::new(repository.clone(), hub.clone()),
            repository,
            hub,
        )
    }

    #[tokio::test]
    async fn test_alice_general_scenario() {
        // テスト項目: 入室 → 送信 → 退室 → 送信 の一連のシナリオ
        // given (前提条件): c1 (Alice) と c2 (Bob) が接続済み、Bob は General に入室済み
        let (chat, _repository, hub) = setup();
        let (tx1, mut rx1) = mpsc::channel(OUTBOUND_BUFFER);
        let (tx2, mut rx2) = mpsc::channel(OUTBOUND_BUFFER);
        hub.register(conn("c1"), tx1);
        hub.register(conn("c2"), tx2);
        chat.dispatch(
            conn("c2"),
            Command::JoinRoom {
                username: user("Bob"),
                room: room("General"),
            },
        )
        .await;
        drain(&mut rx2);

        // when (操作): Alice が General に入室
        let outcome = chat
            .dispatch(
                conn("c1"),
                Command::JoinRoom {
                    username: user("Alice"),
                    room: room("General"),
                },
            )
            .await;

        // then (期待する結果): General の全員に入室通知
        assert_eq!(outcome, DispatchOutcome::Joined(JoinOutcome::Joined));
        assert_eq!(drain(&mut rx1), vec![notice("Alice has joined the chat")]);
        assert_eq!(drain(&mut rx2), vec![notice("Alice has joined the chat")]);

        // when (操作): Alice が "hi" を送信
        chat.dispatch(
            conn("c1"),
            Command::Send {
                message: MessageContent::new("hi".to_string()).unwrap(),
            },
        )
        .await;

        // then (期待する結果):
        let hi = ServerMessage::ReceiveSpecificMessage {
            author: "Alice".to_string(),
            text: "hi".to_string(),
        };
        assert_eq!(drain(&mut rx1), vec![hi.clone()]);
        assert_eq!(drain(&mut rx2), vec![hi]);

        // when (操作): Alice が General から退室
        chat.dispatch(
            conn("c1"),
            Command::LeaveRoom {
                username: user("Alice"),
                room: room("General"),
            },
        )
        .await;

        // then (期待する結果): 残ったメンバーにだけ退室通知
        assert!(drain(&mut rx1).is_empty());
        assert_eq!(drain(&mut rx2), vec![notice("Alice has left the chat")]);

        // when (操作): 退室後の送信
        let outcome = chat
            .dispatch(
                conn("c1"),
                Command::Send {
                    message: MessageContent::new("anyone?".to_string()).unwrap(),
                },
            )
            .await;

        // then (期待する結果): 何も送られない
        assert_eq!(
            outcome,
            DispatchOutcome::Sent(SendOutcome::SenderNotRegistered)
        );
        assert!(drain(&mut rx1).is_empty());
        assert!(drain(&mut rx2).is_empty());
    }

    #[tokio::test]
    async fn test_join_chat_announces_to_everyone() {
        // テスト項目: JoinChat はルームに関係なく全員に通知し、Registry は変更しない
        // given (前提条件):
        let (chat, repository, hub) = setup();
        let (tx1, mut rx1) = mpsc::channel(OUTBOUND_BUFFER);
        let (tx2, mut rx2) = mpsc::channel(OUTBOUND_BUFFER);
        hub.register(conn("c1"), tx1);
        hub.register(conn("c2"), tx2);

        // when (操作):
        let outcome = chat
            .dispatch(conn("c1"), Command::Join { username: user("Alice") })
            .await;

        // then (期待する結果):
        assert_eq!(outcome, DispatchOutcome::Announced);
        assert_eq!(drain(&mut rx1), vec![notice("Alice has joined the chat")]);
        assert_eq!(drain(&mut rx2), vec![notice("Alice has joined the chat")]);
        assert_eq!(repository.count().await, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_joins_each_appear_once() {
        // テスト項目: 異なる接続の並行入室がすべて成功し、各接続が 1 回ずつ所属する
        // given (前提条件):
        let (chat, repository, hub) = setup();
        let total = 50;

        // when (操作):
        let handles: Vec<_> = (0..total)
            .map(|i| {
                let chat = chat.clone();
                tokio::spawn(async move {
                    chat.dispatch(
                        conn(&format!("c{i:02}")),
                        Command::JoinRoom {
                            username: user(&format!("user{i}")),
                            room: room("General"),
                        },
                    )
                    .await
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(
                handle.await.unwrap(),
                DispatchOutcome::Joined(JoinOutcome::Joined)
            );
        }

        // then (期待する結果):
        let members = hub.group_members(&room("General"));
        assert_eq!(members.len(), total);
        let expected: Vec<ConnectionId> = (0..total).map(|i| conn(&format!("c{i:02}"))).collect();
        assert_eq!(members, expected);
        assert_eq!(repository.count().await, total);
    }

    #[tokio::test]
    async fn test_disconnect_removes_stale_record() {
        // テスト項目: disconnect で退室していない接続のレコードが消える
        // given (前提条件):
        let (chat, repository, _hub) = setup();
        chat.dispatch(
            conn("c1"),
            Command::JoinRoom {
                username: user("Alice"),
                room: room("General"),
            },
        )
        .await;

        // when (操作):
        let outcome = chat.disconnect(conn("c1")).await;

        // then (期待する結果):
        assert!(matches!(outcome, DisconnectOutcome::Evicted(_)));
        assert!(repository.get(&conn("c1")).await.is_none());
    }
}
