//! Persistence gateway seam.
//!
//! The engine never talks to storage directly. A [`RecordingGateway`] saves
//! finished recordings and lists a team's stored ones; the `db` crate
//! provides the PostgreSQL implementation.

use async_trait::async_trait;

use crate::court::recording::{SaveRecordingRequest, StoredRecording};
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Team not found: {0}")]
    TeamNotFound(DbId),

    #[error("Invalid recording: {0}")]
    Invalid(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait RecordingGateway: Send + Sync {
    /// Store a recording for `team_id`. Returns the stored id.
    async fn save(
        &self,
        team_id: DbId,
        request: &SaveRecordingRequest,
    ) -> Result<DbId, PersistenceError>;

    /// All recordings of `team_id`, newest first.
    async fn list(&self, team_id: DbId) -> Result<Vec<StoredRecording>, PersistenceError>;
}

/// Outcome of a background save, published to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceNotice {
    Saved {
        recording_id: String,
        stored_id: DbId,
    },
    Failed {
        recording_id: String,
        message: String,
    },
}
