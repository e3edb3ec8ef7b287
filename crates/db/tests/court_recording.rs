//! Integration tests for the team and court recording repositories and the
//! PostgreSQL recording gateway.

use courtboard_core::court::action::{Action, ActionKind};
use courtboard_core::court::gateway::{PersistenceError, RecordingGateway};
use courtboard_core::court::geometry::Point;
use courtboard_core::court::player::default_formation;
use courtboard_core::court::recording::{Movement, SaveRecordingRequest};
use courtboard_db::models::team::CreateTeam;
use courtboard_db::repositories::{CourtRecordingRepo, TeamRepo};
use courtboard_db::PgRecordingGateway;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_team(pool: &PgPool, owner_id: i64) -> i64 {
    TeamRepo::create(
        pool,
        owner_id,
        &CreateTeam {
            name: "Varsity".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn request(name: &str) -> SaveRecordingRequest {
    let players = default_formation();
    let pid = players[0].id.clone();
    let mut moved = players.clone();
    moved[0].position = Point::new(120.0, 300.0);

    let mut pass = Action::new(
        ActionKind::Pass,
        Some(pid.clone()),
        Point::new(120.0, 300.0),
        Point::new(600.0, 380.0),
    );
    pass.timestamp_ms = 800;

    SaveRecordingRequest {
        name: name.to_string(),
        movements: vec![
            Movement {
                player_id: pid.clone(),
                position: Point::new(400.0, 450.0),
                timestamp_ms: 0,
            },
            Movement {
                player_id: pid,
                position: Point::new(120.0, 300.0),
                timestamp_ms: 600,
            },
        ],
        actions: vec![pass],
        players: moved,
        initial_players: Some(players),
        duration_ms: 1000,
    }
}

// ---------------------------------------------------------------------------
// Repositories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_succeeds(pool: PgPool) {
    courtboard_db::health_check(&pool).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn teams_are_listed_per_owner(pool: PgPool) {
    new_team(&pool, 1).await;
    new_team(&pool, 1).await;
    new_team(&pool, 2).await;

    assert_eq!(TeamRepo::list_by_owner(&pool, 1).await.unwrap().len(), 2);
    assert_eq!(TeamRepo::list_by_owner(&pool, 2).await.unwrap().len(), 1);
    assert!(TeamRepo::list_by_owner(&pool, 3).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recording_round_trips_through_jsonb(pool: PgPool) {
    let team_id = new_team(&pool, 1).await;
    let req = request("Horns");

    let row = CourtRecordingRepo::create(&pool, team_id, &req).await.unwrap();
    let found = CourtRecordingRepo::find_by_id(&pool, team_id, row.id)
        .await
        .unwrap()
        .expect("recording should exist");
    let stored = found.into_stored();

    assert_eq!(stored.name, "Horns");
    assert_eq!(stored.movements, req.movements);
    assert_eq!(stored.actions, req.actions);
    assert_eq!(stored.players, req.players);
    assert_eq!(stored.initial_players, req.initial_players);
    assert_eq!(stored.duration_ms, 1000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recording_is_scoped_to_its_team(pool: PgPool) {
    let team_a = new_team(&pool, 1).await;
    let team_b = new_team(&pool, 1).await;
    let row = CourtRecordingRepo::create(&pool, team_a, &request("A"))
        .await
        .unwrap();

    assert!(CourtRecordingRepo::find_by_id(&pool, team_b, row.id)
        .await
        .unwrap()
        .is_none());
    assert!(!CourtRecordingRepo::delete(&pool, team_b, row.id).await.unwrap());
    assert!(CourtRecordingRepo::delete(&pool, team_a, row.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn legacy_row_without_initial_players_defaults_to_players(pool: PgPool) {
    let team_id = new_team(&pool, 1).await;
    let mut req = request("Legacy");
    req.initial_players = None;

    CourtRecordingRepo::create(&pool, team_id, &req).await.unwrap();
    let stored = CourtRecordingRepo::list_by_team(&pool, team_id)
        .await
        .unwrap()
        .remove(0)
        .into_stored();
    assert!(stored.initial_players.is_none());

    let recording = stored.into_recording();
    assert_eq!(recording.initial_players, req.players);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_team_cascades_to_recordings(pool: PgPool) {
    let team_id = new_team(&pool, 1).await;
    CourtRecordingRepo::create(&pool, team_id, &request("Gone"))
        .await
        .unwrap();

    sqlx::query("DELETE FROM teams WHERE id = $1")
        .bind(team_id)
        .execute(&pool)
        .await
        .unwrap();

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM court_recordings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn gateway_lists_newest_first(pool: PgPool) {
    let team_id = new_team(&pool, 1).await;
    let gateway = PgRecordingGateway::new(pool.clone());

    let first = gateway.save(team_id, &request("First")).await.unwrap();
    let second = gateway.save(team_id, &request("Second")).await.unwrap();

    let listed = gateway.list(team_id).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second, first]);
    assert!(listed.iter().all(|r| r.team_id == team_id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn gateway_rejects_unknown_team(pool: PgPool) {
    let gateway = PgRecordingGateway::new(pool);
    let err = gateway.save(999, &request("Orphan")).await.unwrap_err();
    assert!(matches!(err, PersistenceError::TeamNotFound(999)));
    assert!(matches!(
        gateway.list(999).await.unwrap_err(),
        PersistenceError::TeamNotFound(999)
    ));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn gateway_rejects_invalid_request(pool: PgPool) {
    let team_id = new_team(&pool, 1).await;
    let gateway = PgRecordingGateway::new(pool.clone());

    let mut empty = request("Empty");
    empty.movements.clear();
    empty.actions.clear();
    let err = gateway.save(team_id, &empty).await.unwrap_err();
    assert!(matches!(err, PersistenceError::Invalid(_)));

    let mut late = request("Late");
    late.movements[1].timestamp_ms = 5_000;
    assert!(matches!(
        gateway.save(team_id, &late).await.unwrap_err(),
        PersistenceError::Invalid(_)
    ));

    assert!(gateway.list(team_id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversized_duration_is_rejected_not_clamped(pool: PgPool) {
    let team_id = new_team(&pool, 1).await;
    let mut huge = request("Forever");
    huge.duration_ms = u64::MAX;

    let gateway = PgRecordingGateway::new(pool.clone());
    assert!(matches!(
        gateway.save(team_id, &huge).await.unwrap_err(),
        PersistenceError::Invalid(_)
    ));

    let err = CourtRecordingRepo::create(&pool, team_id, &huge)
        .await
        .unwrap_err();
    assert!(matches!(err, sqlx::Error::Encode(_)));
    assert!(CourtRecordingRepo::list_by_team(&pool, team_id)
        .await
        .unwrap()
        .is_empty());
}
