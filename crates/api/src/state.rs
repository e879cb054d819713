//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::services::PosService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and the POS service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    pos: PosService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        let pos = PosService::new(pool.clone());
        Self {
            inner: Arc::new(AppStateInner { pool, pos }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get the POS service.
    #[must_use]
    pub fn pos(&self) -> &PosService {
        &self.inner.pos
    }
}
