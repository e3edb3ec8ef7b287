//! Recordings: captured movement/action sequences and their storage shapes.

use serde::{Deserialize, Serialize};

use crate::court::action::Action;
use crate::court::geometry::Point;
use crate::court::player::Player;
use crate::error::CoreError;
use crate::types::{new_element_id, DbId, ElementId, Timestamp};

/// Maximum length of a recording name.
pub const MAX_NAME_LEN: usize = 200;

/// Upper bound on buffered samples accepted at the storage boundary.
pub const MAX_MOVEMENTS: usize = 50_000;

/// Upper bound on actions accepted at the storage boundary.
pub const MAX_ACTIONS: usize = 2_000;

/// Longest duration storage can hold (a signed 64-bit column).
pub const MAX_DURATION_MS: u64 = i64::MAX as u64;

/// One recorded position sample of a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub player_id: ElementId,
    #[serde(flatten)]
    pub position: Point,
    pub timestamp_ms: u64,
}

/// A captured, immutable sequence of movements and actions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recording {
    pub id: ElementId,
    /// Identifier assigned by the persistence gateway, once known.
    pub stored_id: Option<DbId>,
    pub name: String,
    pub movements: Vec<Movement>,
    pub actions: Vec<Action>,
    /// Layout at the moment recording started; playback starts from here.
    pub initial_players: Vec<Player>,
    /// Layout at the moment recording stopped; kept for reference.
    pub final_players: Vec<Player>,
    pub duration_ms: u64,
    pub created_at: Timestamp,
}

impl Recording {
    /// Build the gateway save request for this recording.
    pub fn to_save_request(&self) -> SaveRecordingRequest {
        SaveRecordingRequest {
            name: self.name.clone(),
            movements: self.movements.clone(),
            actions: self.actions.clone(),
            players: self.final_players.clone(),
            initial_players: Some(self.initial_players.clone()),
            duration_ms: self.duration_ms,
        }
    }
}

/// Default name for the `n`-th recording of a session (1-based).
pub fn default_recording_name(n: usize) -> String {
    format!("Recording {n}")
}

// ---------------------------------------------------------------------------
// Storage shapes
// ---------------------------------------------------------------------------

/// Payload handed to the persistence gateway when a recording is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecordingRequest {
    pub name: String,
    pub movements: Vec<Movement>,
    pub actions: Vec<Action>,
    /// Final player layout.
    pub players: Vec<Player>,
    #[serde(default)]
    pub initial_players: Option<Vec<Player>>,
    pub duration_ms: u64,
}

/// A recording as returned by the persistence gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecording {
    pub id: DbId,
    pub team_id: DbId,
    pub name: String,
    pub movements: Vec<Movement>,
    pub actions: Vec<Action>,
    pub players: Vec<Player>,
    /// Absent for recordings written before the start layout was persisted.
    #[serde(default)]
    pub initial_players: Option<Vec<Player>>,
    pub duration_ms: u64,
    pub created_at: Timestamp,
}

impl StoredRecording {
    /// Re-hydrate into an in-session [`Recording`].
    ///
    /// Missing initial players default to the final layout.
    pub fn into_recording(self) -> Recording {
        let initial_players = self
            .initial_players
            .unwrap_or_else(|| self.players.clone());
        Recording {
            id: new_element_id(),
            stored_id: Some(self.id),
            name: self.name,
            movements: self.movements,
            actions: self.actions,
            initial_players,
            final_players: self.players,
            duration_ms: self.duration_ms,
            created_at: self.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a recording name: non-blank and at most [`MAX_NAME_LEN`] chars.
pub fn validate_recording_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Recording name must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Recording name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a save request before it reaches storage.
///
/// Playback never validates; this is the only place malformed recordings
/// are rejected.
pub fn validate_save_request(req: &SaveRecordingRequest) -> Result<(), CoreError> {
    validate_recording_name(&req.name)?;

    if req.movements.is_empty() && req.actions.is_empty() {
        return Err(CoreError::Validation(
            "Recording must contain at least one movement or action".to_string(),
        ));
    }
    if req.duration_ms > MAX_DURATION_MS {
        return Err(CoreError::Validation(format!(
            "Recording duration {} ms exceeds maximum {MAX_DURATION_MS}",
            req.duration_ms
        )));
    }
    if req.movements.len() > MAX_MOVEMENTS {
        return Err(CoreError::Validation(format!(
            "Recording has {} movements, maximum is {MAX_MOVEMENTS}",
            req.movements.len()
        )));
    }
    if req.actions.len() > MAX_ACTIONS {
        return Err(CoreError::Validation(format!(
            "Recording has {} actions, maximum is {MAX_ACTIONS}",
            req.actions.len()
        )));
    }

    for (i, m) in req.movements.iter().enumerate() {
        if m.timestamp_ms > req.duration_ms {
            return Err(CoreError::Validation(format!(
                "movements[{i}] timestamp {} exceeds duration {}",
                m.timestamp_ms, req.duration_ms
            )));
        }
        if !m.position.is_finite() {
            return Err(CoreError::Validation(format!(
                "movements[{i}] has a non-finite coordinate"
            )));
        }
    }

    for (i, a) in req.actions.iter().enumerate() {
        if a.timestamp_ms > req.duration_ms {
            return Err(CoreError::Validation(format!(
                "actions[{i}] timestamp {} exceeds duration {}",
                a.timestamp_ms, req.duration_ms
            )));
        }
        if !a.start.is_finite() || !a.end.is_finite() {
            return Err(CoreError::Validation(format!(
                "actions[{i}] has a non-finite coordinate"
            )));
        }
    }

    let layouts = req.players.iter().chain(req.initial_players.iter().flatten());
    for p in layouts {
        if p.id.is_empty() {
            return Err(CoreError::Validation("player id must not be empty".to_string()));
        }
        if !p.position.is_finite() {
            return Err(CoreError::Validation(format!(
                "player {} has a non-finite coordinate",
                p.id
            )));
        }
    }

    Ok(())
}
