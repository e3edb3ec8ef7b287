use std::sync::Arc;

use courtboard_core::court::gateway::RecordingGateway;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: courtboard_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Storage used when saving and listing recordings.
    pub gateway: Arc<dyn RecordingGateway>,
}

impl AppState {
    /// State backed by PostgreSQL for both queries and the recording gateway.
    pub fn new(pool: courtboard_db::DbPool, config: ServerConfig) -> Self {
        let gateway = Arc::new(courtboard_db::PgRecordingGateway::new(pool.clone()));
        Self {
            pool,
            config: Arc::new(config),
            gateway,
        }
    }
}
