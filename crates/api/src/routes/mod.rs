pub mod health;
pub mod team;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /teams                                       list, create
/// /teams/{team_id}/recordings                  list, save
/// /teams/{team_id}/recordings/{id}             get, delete
/// /teams/{team_id}/recordings/{id}/frame       sample playback (?at_ms=)
/// ```
///
/// Every route requires a bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/teams", team::router())
}
