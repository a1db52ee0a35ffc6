//! Server state shared by all handlers.

use std::sync::Arc;

use crate::{
    domain::{ConnectionRepository, SignOutPolicy},
    usecase::SessionLifecycle,
};

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn ConnectionRepository>,
    /// Entry points invoked by the WebSocket transport
    pub lifecycle: SessionLifecycle,
}

impl AppState {
    pub fn new(repository: Arc<dyn ConnectionRepository>, sign_out_policy: SignOutPolicy) -> Self {
        let lifecycle = SessionLifecycle::new(repository.clone(), sign_out_policy);
        Self {
            repository,
            lifecycle,
        }
    }
}
