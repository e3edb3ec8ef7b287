//! Handlers for the `/teams` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use courtboard_core::error::CoreError;
use courtboard_core::types::DbId;
use courtboard_db::models::team::{CreateTeam, Team};
use courtboard_db::repositories::TeamRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum length of a team name.
const MAX_TEAM_NAME_LEN: usize = 100;

/// Load a team and check that `user` owns it.
///
/// 404 when the team does not exist, 403 when it belongs to someone else.
pub async fn require_owned_team(
    state: &AppState,
    user: &AuthUser,
    team_id: DbId,
) -> AppResult<Team> {
    let team = TeamRepo::find_by_id(&state.pool, team_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Team",
            id: team_id,
        }))?;

    if team.owner_id != user.user_id {
        tracing::warn!(team_id, user_id = user.user_id, "Team access denied");
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this team".into(),
        )));
    }
    Ok(team)
}

/// GET /api/v1/teams
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Team>>>> {
    let teams = TeamRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: teams }))
}

/// POST /api/v1/teams
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateTeam>,
) -> AppResult<(StatusCode, Json<DataResponse<Team>>)> {
    input.name = input.name.trim().to_string();
    if input.name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Team name must not be empty".into(),
        )));
    }
    if input.name.chars().count() > MAX_TEAM_NAME_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Team name must be at most {MAX_TEAM_NAME_LEN} characters"
        ))));
    }

    let team = TeamRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(team_id = team.id, owner_id = user.user_id, "Team created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: team })))
}
