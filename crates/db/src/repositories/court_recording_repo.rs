//! Repository for the `court_recordings` table.

use courtboard_core::court::recording::SaveRecordingRequest;
use courtboard_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::court_recording::CourtRecording;

const COLUMNS: &str = "id, team_id, name, movements, actions, players, initial_players, \
                       duration_ms, created_at";

pub struct CourtRecordingRepo;

impl CourtRecordingRepo {
    /// Insert a recording for `team_id`, returning the created row.
    ///
    /// The request is stored as given; validation happens before this call.
    /// A duration outside the column's range is an encode error.
    pub async fn create(
        pool: &PgPool,
        team_id: DbId,
        input: &SaveRecordingRequest,
    ) -> Result<CourtRecording, sqlx::Error> {
        let duration_ms =
            i64::try_from(input.duration_ms).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let query = format!(
            "INSERT INTO court_recordings
                (team_id, name, movements, actions, players, initial_players, duration_ms)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourtRecording>(&query)
            .bind(team_id)
            .bind(input.name.trim())
            .bind(Json(&input.movements))
            .bind(Json(&input.actions))
            .bind(Json(&input.players))
            .bind(input.initial_players.as_ref().map(Json))
            .bind(duration_ms)
            .fetch_one(pool)
            .await
    }

    /// Find a recording of `team_id` by id.
    pub async fn find_by_id(
        pool: &PgPool,
        team_id: DbId,
        id: DbId,
    ) -> Result<Option<CourtRecording>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM court_recordings WHERE id = $1 AND team_id = $2");
        sqlx::query_as::<_, CourtRecording>(&query)
            .bind(id)
            .bind(team_id)
            .fetch_optional(pool)
            .await
    }

    /// All recordings of a team, newest first.
    pub async fn list_by_team(
        pool: &PgPool,
        team_id: DbId,
    ) -> Result<Vec<CourtRecording>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM court_recordings
             WHERE team_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CourtRecording>(&query)
            .bind(team_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a recording. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, team_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM court_recordings WHERE id = $1 AND team_id = $2")
            .bind(id)
            .bind(team_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
