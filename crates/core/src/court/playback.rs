//! Playback: virtual clock, interpolated player positions and action reveal.
//!
//! A player's position at virtual time `t` comes from its movement samples:
//! the latest sample at or before `t` and the earliest sample after `t` are
//! interpolated by elapsed-time fraction; with only an earlier sample the
//! player snaps to it; with none the player keeps its last known position.
//! Actions become visible once their timestamp is reached.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::court::action::Action;
use crate::court::config::clamp_speed;
use crate::court::geometry::{time_fraction, Point};
use crate::court::player::Player;
use crate::court::recording::Recording;
use crate::court::session::CourtSession;
use crate::types::ElementId;

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

/// Per-player movement samples, sorted by timestamp.
#[derive(Debug, Clone, Default)]
pub struct TrackIndex {
    tracks: HashMap<ElementId, Vec<(u64, Point)>>,
}

impl TrackIndex {
    pub fn build(recording: &Recording) -> Self {
        let mut tracks: HashMap<ElementId, Vec<(u64, Point)>> = HashMap::new();
        for m in &recording.movements {
            tracks
                .entry(m.player_id.clone())
                .or_default()
                .push((m.timestamp_ms, m.position));
        }
        for samples in tracks.values_mut() {
            // Stable: equal timestamps keep arrival order.
            samples.sort_by_key(|(t, _)| *t);
        }
        Self { tracks }
    }

    /// Position of `player_id` at virtual time `t_ms`, or `None` when the
    /// player has no sample at or before `t_ms`.
    pub fn position_at(&self, player_id: &str, t_ms: f64) -> Option<Point> {
        let samples = self.tracks.get(player_id)?;
        let after = samples.partition_point(|(ts, _)| (*ts as f64) <= t_ms);
        let (prev_t, prev_pos) = *samples.get(after.checked_sub(1)?)?;
        match samples.get(after) {
            Some(&(next_t, next_pos)) => {
                Some(prev_pos.lerp(next_pos, time_fraction(prev_t, next_t, t_ms)))
            }
            None => Some(prev_pos),
        }
    }
}

/// Actions of `recording` visible at virtual time `t_ms`.
pub fn visible_actions(recording: &Recording, t_ms: f64) -> Vec<Action> {
    recording
        .actions
        .iter()
        .filter(|a| (a.timestamp_ms as f64) <= t_ms)
        .cloned()
        .collect()
}

/// The court as it looks at one virtual time of a recording.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackFrame {
    pub at_ms: f64,
    pub players: Vec<Player>,
    pub actions: Vec<Action>,
    pub finished: bool,
}

/// Sample a recording at `t_ms`, starting from its initial players.
///
/// `t_ms` is clamped to `[0, duration]`.
pub fn sample_frame(recording: &Recording, index: &TrackIndex, t_ms: f64) -> PlaybackFrame {
    let duration = recording.duration_ms as f64;
    let at_ms = clamp_time(t_ms, duration);
    let finished = at_ms >= duration;

    let players = recording
        .initial_players
        .iter()
        .map(|p| {
            let mut player = p.clone();
            if let Some(pos) = index.position_at(&p.id, at_ms) {
                player.position = pos;
            }
            player
        })
        .collect();

    let actions = if finished {
        recording.actions.clone()
    } else {
        visible_actions(recording, at_ms)
    };

    PlaybackFrame {
        at_ms,
        players,
        actions,
        finished,
    }
}

fn clamp_time(t_ms: f64, duration: f64) -> f64 {
    if t_ms.is_nan() {
        0.0
    } else {
        t_ms.clamp(0.0, duration.max(0.0))
    }
}

// ---------------------------------------------------------------------------
// Playback state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    /// No recording selected.
    Idle,
    Playing,
    Paused,
    Finished,
}

/// Result of one clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Virtual time advanced; keep ticking.
    Advanced,
    /// The recording ended on this tick; the clock must stop.
    Finished,
    /// Nothing is playing; the clock must stop.
    NotPlaying,
}

/// Virtual clock over one selected recording.
///
/// Playback owns the session layout and actions while a recording is
/// selected.
#[derive(Debug, Clone)]
pub struct Playback {
    status: PlaybackStatus,
    recording: Option<Arc<Recording>>,
    index: TrackIndex,
    virtual_ms: f64,
    speed: f64,
}

impl Playback {
    pub fn new(speed: f64) -> Self {
        Self {
            status: PlaybackStatus::Idle,
            recording: None,
            index: TrackIndex::default(),
            virtual_ms: 0.0,
            speed: clamp_speed(speed),
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn recording(&self) -> Option<&Arc<Recording>> {
        self.recording.as_ref()
    }

    pub fn virtual_ms(&self) -> f64 {
        self.virtual_ms
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Select `recording`, rewind to 0 and load its initial players.
    pub fn start(&mut self, recording: Arc<Recording>, session: &mut CourtSession) {
        self.index = TrackIndex::build(&recording);
        self.virtual_ms = 0.0;
        session.replace(recording.initial_players.clone(), Vec::new());
        self.recording = Some(recording);
        self.status = PlaybackStatus::Playing;
    }

    /// Advance virtual time by one tick of `tick_ms` real milliseconds.
    pub fn tick(&mut self, tick_ms: f64, session: &mut CourtSession) -> TickOutcome {
        if self.status != PlaybackStatus::Playing {
            return TickOutcome::NotPlaying;
        }
        let Some(recording) = self.recording.clone() else {
            self.status = PlaybackStatus::Idle;
            return TickOutcome::NotPlaying;
        };

        let duration = recording.duration_ms as f64;
        let next = self.virtual_ms + tick_ms * self.speed;
        self.virtual_ms = clamp_time(next, duration);
        self.apply_positions(session);

        if next >= duration {
            self.virtual_ms = duration;
            session.set_actions(recording.actions.clone());
            self.status = PlaybackStatus::Finished;
            tracing::debug!(recording_id = %recording.id, "Playback finished");
            return TickOutcome::Finished;
        }

        session.set_actions(visible_actions(&recording, self.virtual_ms));
        TickOutcome::Advanced
    }

    /// Jump to `t_ms` (clamped) and redraw the frame from the initial layout.
    ///
    /// Keeps the current status, except that reaching the end finishes.
    pub fn seek(&mut self, t_ms: f64, session: &mut CourtSession) {
        let Some(recording) = self.recording.clone() else {
            return;
        };
        let frame = sample_frame(&recording, &self.index, t_ms);
        self.virtual_ms = frame.at_ms;
        if frame.finished {
            self.status = PlaybackStatus::Finished;
        } else if self.status == PlaybackStatus::Finished {
            self.status = PlaybackStatus::Paused;
        }
        session.replace(frame.players, frame.actions);
    }

    /// Playing -> Paused. Returns `false` when not playing.
    pub fn pause(&mut self) -> bool {
        if self.status != PlaybackStatus::Playing {
            return false;
        }
        self.status = PlaybackStatus::Paused;
        true
    }

    /// Paused -> Playing. Returns `false` when not paused.
    pub fn resume(&mut self) -> bool {
        if self.status != PlaybackStatus::Paused {
            return false;
        }
        self.status = PlaybackStatus::Playing;
        true
    }

    /// Deselect the recording and rewind.
    pub fn stop(&mut self) {
        self.status = PlaybackStatus::Idle;
        self.recording = None;
        self.index = TrackIndex::default();
        self.virtual_ms = 0.0;
    }

    /// Change the per-tick advance for subsequent ticks. Returns the applied
    /// (clamped) speed.
    pub fn set_speed(&mut self, speed: f64) -> f64 {
        self.speed = clamp_speed(speed);
        self.speed
    }

    fn apply_positions(&self, session: &mut CourtSession) {
        for player in session.players_mut() {
            if let Some(pos) = self.index.position_at(&player.id, self.virtual_ms) {
                player.position = pos;
            }
        }
    }
}
