//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::ConnectionRepository,
    infrastructure::{repository::InMemoryConnectionRepository, transport::InMemoryGroupHub},
    usecase::ChatHub,
};

/// Shared application state
pub struct AppState {
    /// Command dispatcher（UseCase 層への入口）
    pub chat: ChatHub,
    /// Registry（読み取り専用 API から参照）
    pub repository: Arc<dyn ConnectionRepository>,
    /// Per-socket outbound channels and room groups
    pub hub: Arc<InMemoryGroupHub>,
    /// Run the disconnect cleanup when a socket closes without leaving
    pub evict_on_disconnect: bool,
}

impl AppState {
    /// Wire the in-memory registry and hub together.
    pub fn new(evict_on_disconnect: bool) -> Self {
        let repository: Arc<dyn ConnectionRepository> =
            Arc::new(InMemoryConnectionRepository::new());
        let hub = Arc::new(InMemoryGroupHub::new());
        Self {
            chat: ChatHub::new(repository.clone(), hub.clone()),
            repository,
            hub,
            evict_on_disconnect,
        }
    }
}
