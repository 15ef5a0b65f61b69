//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から ChatHub 経由で呼び出され、Domain 層の trait を操作します。

pub mod announce_global;
pub mod chat_hub;
pub mod disconnect_connection;
pub mod join_room;
pub mod leave_room;
pub mod send_message;

pub use announce_global::AnnounceGlobalUseCase;
pub use chat_hub::{ChatHub, DispatchOutcome};
pub use disconnect_connection::{DisconnectConnectionUseCase, DisconnectOutcome};
pub use join_room::{JoinOutcome, JoinRoomUseCase};
pub use leave_room::{LeaveOutcome, LeaveRoomUseCase};
pub use send_message::{SendMessageUseCase, SendOutcome};
