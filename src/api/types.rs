//! Shared types for the HTTP API layer.

use std::sync::Arc;

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::authorization::Actor;
use crate::core_state::CoreState;
use crate::models::User;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }

    /// Run a database closure on the blocking pool with a fresh connection.
    ///
    /// SQLite calls can wait on `busy_timeout` and password hashing is
    /// CPU-bound; neither belongs on an async worker thread.
    pub async fn with_db<T, E, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&CoreState, &Connection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Into<ApiError> + Send + 'static,
    {
        let core = Arc::clone(&self.core);
        tokio::task::spawn_blocking(move || -> Result<T, ApiError> {
            let conn = core.open_db()?;
            f(core.as_ref(), &conn).map_err(Into::into)
        })
        .await?
    }
}

// ═══════════════════════════════════════════════════════════
// Actor context: injected by auth middleware
// ═══════════════════════════════════════════════════════════

/// Authenticated caller, injected into request extensions by the auth
/// middleware after the bearer token resolves.
#[derive(Debug, Clone)]
pub struct ActorContext {
    pub actor: Actor,
    pub user: User,
    /// Raw token, kept so logout can revoke exactly this session.
    pub token: String,
}
