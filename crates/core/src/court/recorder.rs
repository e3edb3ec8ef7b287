//! Movement recorder: the Idle/Recording state machine.
//!
//! While recording, player moves are de-noised against the last buffered
//! sample of the same player, and committed actions are buffered with their
//! offset from the start. Stopping assembles an immutable [`Recording`], or
//! nothing when both buffers are empty.

use std::collections::HashMap;

use chrono::Utc;

use crate::court::action::Action;
use crate::court::geometry::Point;
use crate::court::player::Player;
use crate::court::recording::{Movement, Recording};
use crate::types::{new_element_id, ElementId};

/// Recorder state.
#[derive(Debug, Clone, PartialEq)]
pub enum RecorderState {
    Idle,
    Recording {
        started_at_ms: u64,
        /// Layout captured at start. Never mutated afterwards.
        initial_players: Vec<Player>,
    },
}

/// Buffers movements and actions for the active recording.
#[derive(Debug, Clone)]
pub struct MovementRecorder {
    state: RecorderState,
    movements: Vec<Movement>,
    actions: Vec<Action>,
    last_sample: HashMap<ElementId, Point>,
    threshold: f64,
}

impl MovementRecorder {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: RecorderState::Idle,
            movements: Vec::new(),
            actions: Vec::new(),
            last_sample: HashMap::new(),
            threshold,
        }
    }

    pub fn state(&self) -> &RecorderState {
        &self.state
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording { .. })
    }

    pub fn buffered_movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn buffered_actions(&self) -> &[Action] {
        &self.actions
    }

    /// Idle -> Recording. Restarting while already recording discards the
    /// buffers and captures a fresh snapshot.
    pub fn start(&mut self, now_ms: u64, players: &[Player]) {
        if self.is_recording() {
            tracing::warn!(
                movements = self.movements.len(),
                actions = self.actions.len(),
                "Recording restarted, buffered capture discarded"
            );
        }
        self.movements.clear();
        self.actions.clear();
        self.last_sample.clear();
        self.state = RecorderState::Recording {
            started_at_ms: now_ms,
            initial_players: players.to_vec(),
        };
        tracing::debug!(players = players.len(), "Recording started");
    }

    /// Offer a player move as a movement sample.
    ///
    /// Returns `true` when the sample was buffered.
    pub fn record_move(&mut self, now_ms: u64, player_id: &str, position: Point) -> bool {
        let RecorderState::Recording { started_at_ms, .. } = self.state else {
            return false;
        };

        if let Some(last) = self.last_sample.get(player_id) {
            if last.distance_to(position) <= self.threshold {
                return false;
            }
        }

        self.last_sample.insert(player_id.to_string(), position);
        self.movements.push(Movement {
            player_id: player_id.to_string(),
            position,
            timestamp_ms: now_ms.saturating_sub(started_at_ms),
        });
        true
    }

    /// Buffer a committed action, stamping its offset from the start.
    ///
    /// Returns the stamped action, or `None` when idle.
    pub fn record_action(&mut self, now_ms: u64, mut action: Action) -> Option<Action> {
        let RecorderState::Recording { started_at_ms, .. } = self.state else {
            return None;
        };
        action.timestamp_ms = now_ms.saturating_sub(started_at_ms);
        self.actions.push(action.clone());
        Some(action)
    }

    /// Recording -> Idle.
    ///
    /// Returns the assembled recording, or `None` when idle or when nothing
    /// was buffered.
    pub fn stop(
        &mut self,
        now_ms: u64,
        final_players: &[Player],
        name: String,
    ) -> Option<Recording> {
        let state = std::mem::replace(&mut self.state, RecorderState::Idle);
        let RecorderState::Recording {
            started_at_ms,
            initial_players,
        } = state
        else {
            return None;
        };

        self.last_sample.clear();
        let movements = std::mem::take(&mut self.movements);
        let actions = std::mem::take(&mut self.actions);

        if movements.is_empty() && actions.is_empty() {
            tracing::debug!("Recording stopped with empty buffers, discarded");
            return None;
        }

        // Samples were stamped against the same start, so the last one bounds
        // the duration even if the time source misbehaves.
        let last_sample_ms = movements
            .iter()
            .map(|m| m.timestamp_ms)
            .chain(actions.iter().map(|a| a.timestamp_ms))
            .max()
            .unwrap_or(0);
        let duration_ms = now_ms.saturating_sub(started_at_ms).max(last_sample_ms);

        let recording = Recording {
            id: new_element_id(),
            stored_id: None,
            name,
            movements,
            actions,
            initial_players,
            final_players: final_players.to_vec(),
            duration_ms,
            created_at: Utc::now(),
        };

        tracing::info!(
            recording_id = %recording.id,
            movements = recording.movements.len(),
            actions = recording.actions.len(),
            duration_ms,
            "Recording captured"
        );

        Some(recording)
    }
}
