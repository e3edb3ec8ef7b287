//! Court recording row model.

use courtboard_core::court::action::Action;
use courtboard_core::court::player::Player;
use courtboard_core::court::recording::{Movement, StoredRecording};
use courtboard_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `court_recordings` table.
#[derive(Debug, Clone, FromRow)]
pub struct CourtRecording {
    pub id: DbId,
    pub team_id: DbId,
    pub name: String,
    pub movements: Json<Vec<Movement>>,
    pub actions: Json<Vec<Action>>,
    pub players: Json<Vec<Player>>,
    pub initial_players: Option<Json<Vec<Player>>>,
    pub duration_ms: i64,
    pub created_at: Timestamp,
}

impl CourtRecording {
    pub fn into_stored(self) -> StoredRecording {
        StoredRecording {
            id: self.id,
            team_id: self.team_id,
            name: self.name,
            movements: self.movements.0,
            actions: self.actions.0,
            players: self.players.0,
            initial_players: self.initial_players.map(|j| j.0),
            duration_ms: u64::try_from(self.duration_ms).unwrap_or(0),
            created_at: self.created_at,
        }
    }
}
