//! [`CourtEditor`]: one coach's editing session.
//!
//! Composes the session state, the movement recorder, the drawing tool and
//! playback into a single synchronous engine. Every method is a total
//! function over the current state; the real-time clock and persistence live
//! in [`crate::court::live`].
//!
//! Playback takes ownership of the layout and actions while a recording is
//! selected. Callers are expected to disable drag/draw gestures during
//! playback; the editor does not enforce it.
//!
//! Playback transitions are crate-private: outside this crate they are only
//! reachable through [`crate::court::live::LiveCourt`], which owns the clock.

use std::sync::Arc;

use crate::court::action::{Action, ActionKind};
use crate::court::config::CourtConfig;
use crate::court::drawing::{ActionDrawing, DrawingState};
use crate::court::geometry::Point;
use crate::court::playback::{Playback, PlaybackStatus, TickOutcome};
use crate::court::player::{Player, PlayerRole};
use crate::court::recorder::MovementRecorder;
use crate::court::recording::{default_recording_name, Recording, StoredRecording};
use crate::court::session::CourtSession;
use crate::court::time::TimeSource;
use crate::types::{DbId, ElementId};

pub struct CourtEditor {
    config: CourtConfig,
    time: Arc<dyn TimeSource>,
    session: CourtSession,
    recorder: MovementRecorder,
    drawing: ActionDrawing,
    playback: Playback,
    recordings: Vec<Arc<Recording>>,
}

impl CourtEditor {
    /// Initialize a session on the default formation.
    pub fn new(config: CourtConfig, time: Arc<dyn TimeSource>) -> Self {
        Self {
            session: CourtSession::new(),
            recorder: MovementRecorder::new(config.movement_threshold),
            drawing: ActionDrawing::new(config.min_action_length),
            playback: Playback::new(config.default_speed),
            recordings: Vec::new(),
            time,
            config,
        }
    }

    pub fn config(&self) -> &CourtConfig {
        &self.config
    }

    // -- Session ------------------------------------------------------------

    pub fn players(&self) -> &[Player] {
        self.session.players()
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.session.player(id)
    }

    pub fn actions(&self) -> &[Action] {
        self.session.actions()
    }

    pub fn selected_player(&self) -> Option<&str> {
        self.session.selected_player()
    }

    pub fn add_player(&mut self, role: PlayerRole) -> ElementId {
        self.session.add_player(role).id.clone()
    }

    pub fn remove_player(&mut self, id: &str) -> bool {
        self.session.remove_player(id)
    }

    pub fn select_player(&mut self, id: Option<&str>) {
        self.session.select_player(id);
    }

    /// Move a player. While recording, the move is also offered to the
    /// recorder as a movement sample.
    pub fn move_player(&mut self, id: &str, position: Point) -> bool {
        if !self.session.move_player(id, position) {
            return false;
        }
        if self.recorder.is_recording() {
            let now = self.time.now_ms();
            self.recorder.record_move(now, id, position);
        }
        true
    }

    pub fn remove_action(&mut self, id: &str) -> bool {
        self.session.remove_action(id)
    }

    pub fn clear_actions(&mut self) {
        self.session.clear_actions();
    }

    /// Default formation, no actions, no drawing mode, no selection.
    /// Finished recordings are kept.
    pub fn reset(&mut self) {
        self.session.reset();
        self.drawing.disarm();
    }

    // -- Recording ----------------------------------------------------------

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn start_recording(&mut self) {
        let now = self.time.now_ms();
        self.recorder.start(now, self.session.players());
    }

    /// Stop recording and keep the result in the session.
    ///
    /// Returns `None` when nothing was recorded. Without a name the recording
    /// is called `Recording N`.
    pub fn stop_recording(&mut self, name: Option<String>) -> Option<Arc<Recording>> {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| default_recording_name(self.recordings.len() + 1));
        let now = self.time.now_ms();
        let recording = Arc::new(self.recorder.stop(now, self.session.players(), name)?);
        self.recordings.push(Arc::clone(&recording));
        Some(recording)
    }

    pub fn recordings(&self) -> &[Arc<Recording>] {
        &self.recordings
    }

    pub fn recording(&self, id: &str) -> Option<&Arc<Recording>> {
        self.recordings.iter().find(|r| r.id == id)
    }

    /// Record the gateway id of a locally captured recording.
    ///
    /// Recordings are immutable, so the entry is replaced by a copy. A
    /// playback already holding the old `Arc` is unaffected.
    pub fn mark_stored(&mut self, id: &str, stored_id: DbId) -> bool {
        let Some(slot) = self.recordings.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        let mut updated = (**slot).clone();
        updated.stored_id = Some(stored_id);
        *slot = Arc::new(updated);
        true
    }

    /// Add recordings fetched from storage, skipping ones already present.
    ///
    /// Returns how many were added.
    pub fn load_recordings(&mut self, stored: Vec<StoredRecording>) -> usize {
        let mut added = 0;
        for s in stored {
            if self.recordings.iter().any(|r| r.stored_id == Some(s.id)) {
                continue;
            }
            self.recordings.push(Arc::new(s.into_recording()));
            added += 1;
        }
        added
    }

    // -- Drawing ------------------------------------------------------------

    pub fn drawing_state(&self) -> &DrawingState {
        self.drawing.state()
    }

    pub fn toggle_action_kind(&mut self, kind: ActionKind) {
        self.drawing.toggle_kind(kind);
    }

    pub fn pointer_down(&mut self, position: Point, on_player: Option<&str>) -> bool {
        self.drawing.pointer_down(position, on_player.map(str::to_string))
    }

    pub fn pointer_move(&mut self, position: Point) {
        self.drawing.pointer_move(position);
    }

    pub fn action_preview(&self) -> Option<Action> {
        self.drawing.preview()
    }

    /// Finish a gesture. A committed action goes onto the court and, while
    /// recording, into the recorder with its offset from the start.
    pub fn pointer_up(&mut self, position: Point) -> Option<Action> {
        let mut action = self.drawing.pointer_up(position)?;
        if self.recorder.is_recording() {
            let now = self.time.now_ms();
            if let Some(stamped) = self.recorder.record_action(now, action.clone()) {
                action = stamped;
            }
        }
        self.session.push_action(action.clone());
        Some(action)
    }

    // -- Playback -----------------------------------------------------------

    pub fn playback_status(&self) -> PlaybackStatus {
        self.playback.status()
    }

    pub fn playback_time_ms(&self) -> f64 {
        self.playback.virtual_ms()
    }

    pub fn playback_speed(&self) -> f64 {
        self.playback.speed()
    }

    pub fn selected_recording(&self) -> Option<&Arc<Recording>> {
        self.playback.recording()
    }

    /// Start playing a recording from the top. Returns `false` for an
    /// unknown id.
    pub(crate) fn play(&mut self, recording_id: &str) -> bool {
        let Some(recording) = self.recording(recording_id).cloned() else {
            return false;
        };
        self.play_recording(recording);
        true
    }

    /// Start playing any recording, listed in the session or not.
    pub(crate) fn play_recording(&mut self, recording: Arc<Recording>) {
        tracing::debug!(recording_id = %recording.id, "Playback started");
        self.drawing.disarm();
        self.playback.start(recording, &mut self.session);
    }

    /// Play the selected recording again from the top.
    pub(crate) fn restart(&mut self) -> bool {
        let Some(recording) = self.playback.recording().cloned() else {
            return false;
        };
        self.play_recording(recording);
        true
    }

    pub(crate) fn pause(&mut self) -> bool {
        self.playback.pause()
    }

    pub(crate) fn resume(&mut self) -> bool {
        self.playback.resume()
    }

    /// Deselect the recording, rewind and reset the session.
    pub(crate) fn stop_playback(&mut self) {
        self.playback.stop();
        self.reset();
    }

    pub(crate) fn set_speed(&mut self, speed: f64) -> f64 {
        self.playback.set_speed(speed)
    }

    pub(crate) fn seek(&mut self, t_ms: f64) {
        self.playback.seek(t_ms, &mut self.session);
    }

    /// Advance playback by one configured tick period.
    pub(crate) fn tick(&mut self) -> TickOutcome {
        let tick_ms = self.config.tick_period_ms();
        self.playback.tick(tick_ms, &mut self.session)
    }
}
