//! Handlers for `/teams/{team_id}/recordings`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use courtboard_core::court::playback::{sample_frame, PlaybackFrame, TrackIndex};
use courtboard_core::court::recording::{
    validate_save_request, SaveRecordingRequest, StoredRecording,
};
use courtboard_core::error::CoreError;
use courtboard_core::types::DbId;
use courtboard_db::repositories::CourtRecordingRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::team::require_owned_team;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Recording",
        id,
    })
}

async fn find_recording(state: &AppState, team_id: DbId, id: DbId) -> AppResult<StoredRecording> {
    let row = CourtRecordingRepo::find_by_id(&state.pool, team_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(row.into_stored())
}

/// GET /api/v1/teams/{team_id}/recordings
///
/// Newest first.
pub async fn list_by_team(
    user: AuthUser,
    State(state): State<AppState>,
    Path(team_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<StoredRecording>>>> {
    require_owned_team(&state, &user, team_id).await?;
    let recordings = state.gateway.list(team_id).await?;
    Ok(Json(DataResponse { data: recordings }))
}

/// POST /api/v1/teams/{team_id}/recordings
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Path(team_id): Path<DbId>,
    Json(input): Json<SaveRecordingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<StoredRecording>>)> {
    require_owned_team(&state, &user, team_id).await?;
    validate_save_request(&input)?;

    let id = state.gateway.save(team_id, &input).await?;
    let recording = find_recording(&state, team_id, id).await?;

    tracing::info!(
        team_id,
        recording_id = id,
        movements = recording.movements.len(),
        actions = recording.actions.len(),
        "Recording saved"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: recording })))
}

/// GET /api/v1/teams/{team_id}/recordings/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    Path((team_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<StoredRecording>>> {
    require_owned_team(&state, &user, team_id).await?;
    let recording = find_recording(&state, team_id, id).await?;
    Ok(Json(DataResponse { data: recording }))
}

/// DELETE /api/v1/teams/{team_id}/recordings/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path((team_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    require_owned_team(&state, &user, team_id).await?;
    if CourtRecordingRepo::delete(&state.pool, team_id, id).await? {
        tracing::info!(team_id, recording_id = id, "Recording deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

#[derive(Debug, Deserialize)]
pub struct FrameQuery {
    /// Virtual time in milliseconds; clamped to the recording's duration.
    #[serde(default)]
    pub at_ms: f64,
}

/// GET /api/v1/teams/{team_id}/recordings/{id}/frame?at_ms=
///
/// The court as playback would show it at `at_ms`.
pub async fn frame(
    user: AuthUser,
    State(state): State<AppState>,
    Path((team_id, id)): Path<(DbId, DbId)>,
    Query(query): Query<FrameQuery>,
) -> AppResult<Json<DataResponse<PlaybackFrame>>> {
    require_owned_team(&state, &user, team_id).await?;
    if !query.at_ms.is_finite() {
        return Err(AppError::BadRequest("at_ms must be a finite number".into()));
    }

    let recording = find_recording(&state, team_id, id).await?.into_recording();
    let index = TrackIndex::build(&recording);
    let frame = sample_frame(&recording, &index, query.at_ms);
    Ok(Json(DataResponse { data: frame }))
}
