//! Route definitions for the `/teams` resource and its recordings.

use axum::routing::get;
use axum::Router;

use crate::handlers::{court_recording, team};
use crate::state::AppState;

/// Routes mounted at `/teams`.
///
/// ```text
/// GET    /                                   -> list
/// POST   /                                   -> create
///
/// GET    /{team_id}/recordings               -> list_by_team
/// POST   /{team_id}/recordings               -> create
/// GET    /{team_id}/recordings/{id}          -> get_by_id
/// DELETE /{team_id}/recordings/{id}          -> delete
/// GET    /{team_id}/recordings/{id}/frame    -> frame
/// ```
pub fn router() -> Router<AppState> {
    let recording_routes = Router::new()
        .route(
            "/",
            get(court_recording::list_by_team).post(court_recording::create),
        )
        .route(
            "/{id}",
            get(court_recording::get_by_id).delete(court_recording::delete),
        )
        .route("/{id}/frame", get(court_recording::frame));

    Router::new()
        .route("/", get(team::list).post(team::create))
        .nest("/{team_id}/recordings", recording_routes)
}
