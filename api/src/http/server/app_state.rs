use board_core::{MessageBoardRepositories, MessageBoardService};

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    pub service: MessageBoardService,
}

impl AppState {
    pub fn new(service: MessageBoardService) -> Self {
        Self { service }
    }

    /// Shutdown the underlying database pool
    pub async fn shutdown(&self) {
        self.service.shutdown_pool().await
    }
}

impl From<MessageBoardRepositories> for AppState {
    fn from(repositories: MessageBoardRepositories) -> Self {
        AppState {
            service: repositories.into(),
        }
    }
}
