//! PostgreSQL implementation of the court engine's recording gateway.

use async_trait::async_trait;
use courtboard_core::court::gateway::{PersistenceError, RecordingGateway};
use courtboard_core::court::recording::{
    validate_save_request, SaveRecordingRequest, StoredRecording,
};
use courtboard_core::types::DbId;

use crate::repositories::{CourtRecordingRepo, TeamRepo};
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgRecordingGateway {
    pool: DbPool,
}

impl PgRecordingGateway {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn ensure_team(&self, team_id: DbId) -> Result<(), PersistenceError> {
        if TeamRepo::exists(&self.pool, team_id)
            .await
            .map_err(unavailable)?
        {
            Ok(())
        } else {
            Err(PersistenceError::TeamNotFound(team_id))
        }
    }
}

fn unavailable(e: sqlx::Error) -> PersistenceError {
    tracing::error!(error = %e, "Recording storage query failed");
    PersistenceError::Unavailable(e.to_string())
}

#[async_trait]
impl RecordingGateway for PgRecordingGateway {
    async fn save(
        &self,
        team_id: DbId,
        request: &SaveRecordingRequest,
    ) -> Result<DbId, PersistenceError> {
        validate_save_request(request).map_err(|e| PersistenceError::Invalid(e.to_string()))?;
        self.ensure_team(team_id).await?;

        let row = CourtRecordingRepo::create(&self.pool, team_id, request)
            .await
            .map_err(unavailable)?;
        Ok(row.id)
    }

    async fn list(&self, team_id: DbId) -> Result<Vec<StoredRecording>, PersistenceError> {
        self.ensure_team(team_id).await?;
        let rows = CourtRecordingRepo::list_by_team(&self.pool, team_id)
            .await
            .map_err(unavailable)?;
        Ok(rows.into_iter().map(|r| r.into_stored()).collect())
    }
}
