//! [`LiveCourt`]: the engine running in real time.
//!
//! Wraps a [`CourtEditor`] behind an async mutex, owns the single playback
//! clock and forwards finished recordings to an optional
//! [`RecordingGateway`]. Save outcomes are published as
//! [`PersistenceNotice`]s.
//!
//! Playback transitions are only available here, so every started playback
//! has a clock. Editing operations go through [`LiveCourt::lock`].

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex, MutexGuard};

use crate::court::clock::ClockHandle;
use crate::court::config::CourtConfig;
use crate::court::editor::CourtEditor;
use crate::court::gateway::{PersistenceError, PersistenceNotice, RecordingGateway};
use crate::court::playback::PlaybackStatus;
use crate::court::recording::Recording;
use crate::court::time::{MonotonicTime, TimeSource};
use crate::types::DbId;

const NOTICE_CAPACITY: usize = 32;

struct Persistence {
    gateway: Arc<dyn RecordingGateway>,
    team_id: DbId,
}

pub struct LiveCourt {
    editor: Arc<Mutex<CourtEditor>>,
    clock: Option<ClockHandle>,
    persistence: Option<Persistence>,
    notices: broadcast::Sender<PersistenceNotice>,
}

impl LiveCourt {
    /// A live court timed by the tokio clock.
    pub fn new(config: CourtConfig) -> Self {
        Self::with_time(config, Arc::new(MonotonicTime::new()))
    }

    pub fn with_time(config: CourtConfig, time: Arc<dyn TimeSource>) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        Self {
            editor: Arc::new(Mutex::new(CourtEditor::new(config, time))),
            clock: None,
            persistence: None,
            notices,
        }
    }

    /// Save finished recordings to `gateway` under `team_id`.
    pub fn with_gateway(mut self, gateway: Arc<dyn RecordingGateway>, team_id: DbId) -> Self {
        self.persistence = Some(Persistence { gateway, team_id });
        self
    }

    /// Lock the editor for session, drawing and recording operations.
    ///
    /// Playback cannot be started through the guard:
    ///
    /// ```compile_fail
    /// use courtboard_core::court::{CourtConfig, LiveCourt};
    ///
    /// async fn bypass(court: &LiveCourt) {
    ///     court.lock().await.play("recording");
    /// }
    /// ```
    pub async fn lock(&self) -> MutexGuard<'_, CourtEditor> {
        self.editor.lock().await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PersistenceNotice> {
        self.notices.subscribe()
    }

    /// Whether a clock task is currently ticking.
    pub fn is_clock_running(&self) -> bool {
        self.clock.as_ref().is_some_and(|c| !c.is_finished())
    }

    // -- Playback -----------------------------------------------------------

    /// Play a recording from the top. Returns `false` for an unknown id.
    pub async fn play(&mut self, recording_id: &str) -> bool {
        self.cancel_clock();
        let started = self.editor.lock().await.play(recording_id);
        if started {
            self.start_clock().await;
        }
        started
    }

    pub async fn restart(&mut self) -> bool {
        self.cancel_clock();
        let restarted = self.editor.lock().await.restart();
        if restarted {
            self.start_clock().await;
        }
        restarted
    }

    pub async fn pause(&mut self) -> bool {
        self.cancel_clock();
        self.editor.lock().await.pause()
    }

    pub async fn resume(&mut self) -> bool {
        let resumed = self.editor.lock().await.resume();
        if resumed {
            self.cancel_clock();
            self.start_clock().await;
        }
        resumed
    }

    /// Stop playback and reset the session.
    pub async fn stop(&mut self) {
        self.cancel_clock();
        self.editor.lock().await.stop_playback();
    }

    /// Applies to ticks after the call; the running clock is kept.
    pub async fn set_speed(&self, speed: f64) -> f64 {
        self.editor.lock().await.set_speed(speed)
    }

    pub async fn seek(&mut self, t_ms: f64) {
        let finished = {
            let mut editor = self.editor.lock().await;
            editor.seek(t_ms);
            editor.playback_status() == PlaybackStatus::Finished
        };
        if finished {
            self.cancel_clock();
        }
    }

    async fn start_clock(&mut self) {
        let period = self.editor.lock().await.config().tick_period;
        self.clock = Some(ClockHandle::spawn(Arc::clone(&self.editor), period));
    }

    fn cancel_clock(&mut self) {
        if let Some(clock) = self.clock.take() {
            clock.cancel();
        }
    }

    // -- Recording ----------------------------------------------------------

    pub async fn start_recording(&self) {
        self.editor.lock().await.start_recording();
    }

    /// Stop recording. A non-empty recording is kept in the session and,
    /// when a gateway is configured, saved in the background.
    pub async fn stop_recording(&self, name: Option<String>) -> Option<Arc<Recording>> {
        let recording = self.editor.lock().await.stop_recording(name)?;
        if let Some(persistence) = &self.persistence {
            self.spawn_save(persistence, Arc::clone(&recording));
        }
        Some(recording)
    }

    fn spawn_save(&self, persistence: &Persistence, recording: Arc<Recording>) {
        let gateway = Arc::clone(&persistence.gateway);
        let team_id = persistence.team_id;
        let editor = Arc::clone(&self.editor);
        let notices = self.notices.clone();

        tokio::spawn(async move {
            let request = recording.to_save_request();
            let notice = match gateway.save(team_id, &request).await {
                Ok(stored_id) => {
                    editor.lock().await.mark_stored(&recording.id, stored_id);
                    tracing::info!(
                        recording_id = %recording.id,
                        stored_id,
                        team_id,
                        "Recording saved"
                    );
                    PersistenceNotice::Saved {
                        recording_id: recording.id.clone(),
                        stored_id,
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        recording_id = %recording.id,
                        team_id,
                        error = %e,
                        "Recording save failed, kept locally"
                    );
                    PersistenceNotice::Failed {
                        recording_id: recording.id.clone(),
                        message: e.to_string(),
                    }
                }
            };
            // No subscribers is fine.
            let _ = notices.send(notice);
        });
    }

    /// Fetch the team's stored recordings and add the ones not yet in the
    /// session. Returns how many were added; `0` without a gateway.
    pub async fn load_team_recordings(&self) -> Result<usize, PersistenceError> {
        let Some(persistence) = &self.persistence else {
            return Ok(0);
        };
        let stored = persistence.gateway.list(persistence.team_id).await?;
        let added = self.editor.lock().await.load_recordings(stored);
        tracing::debug!(team_id = persistence.team_id, added, "Team recordings loaded");
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::court::geometry::Point;
    use crate::court::recording::{SaveRecordingRequest, StoredRecording};
    use crate::court::time::ManualTime;

    #[derive(Default)]
    struct MemoryGateway {
        saved: std::sync::Mutex<Vec<(DbId, SaveRecordingRequest)>>,
    }

    #[async_trait]
    impl RecordingGateway for MemoryGateway {
        async fn save(
            &self,
            team_id: DbId,
            request: &SaveRecordingRequest,
        ) -> Result<DbId, PersistenceError> {
            let mut saved = self.saved.lock().unwrap();
            saved.push((team_id, request.clone()));
            Ok(saved.len() as DbId)
        }

        async fn list(&self, team_id: DbId) -> Result<Vec<StoredRecording>, PersistenceError> {
            let saved = self.saved.lock().unwrap();
            Ok(saved
                .iter()
                .enumerate()
                .filter(|(_, (t, _))| *t == team_id)
                .rev()
                .map(|(i, (t, req))| StoredRecording {
                    id: i as DbId + 1,
                    team_id: *t,
                    name: req.name.clone(),
                    movements: req.movements.clone(),
                    actions: req.actions.clone(),
                    players: req.players.clone(),
                    initial_players: req.initial_players.clone(),
                    duration_ms: req.duration_ms,
                    created_at: Utc::now(),
                })
                .collect())
        }
    }

    struct DownGateway;

    #[async_trait]
    impl RecordingGateway for DownGateway {
        async fn save(&self, _: DbId, _: &SaveRecordingRequest) -> Result<DbId, PersistenceError> {
            Err(PersistenceError::Unavailable("connection refused".to_string()))
        }

        async fn list(&self, _: DbId) -> Result<Vec<StoredRecording>, PersistenceError> {
            Err(PersistenceError::Unavailable("connection refused".to_string()))
        }
    }

    fn live() -> (LiveCourt, ManualTime) {
        let time = ManualTime::new();
        let court = LiveCourt::with_time(CourtConfig::default(), Arc::new(time.clone()));
        (court, time)
    }

    /// One player runs from x=0 to x=100 over one second of recording time.
    async fn record_run(court: &LiveCourt, time: &ManualTime) -> (Arc<Recording>, String) {
        let pid = court.lock().await.players()[0].id.clone();
        court.start_recording().await;
        {
            let mut editor = court.lock().await;
            editor.move_player(&pid, Point::new(0.0, 0.0));
            time.advance(1000);
            editor.move_player(&pid, Point::new(100.0, 0.0));
        }
        let rec = court.stop_recording(None).await.unwrap();
        (rec, pid)
    }

    async fn virtual_ms(court: &LiveCourt) -> f64 {
        court.lock().await.playback_time_ms()
    }

    #[tokio::test(start_paused = true)]
    async fn clock_advances_playback_in_real_time() {
        let (mut court, time) = live();
        let (rec, pid) = record_run(&court, &time).await;

        assert!(court.play(&rec.id).await);
        tokio::time::sleep(Duration::from_millis(525)).await;

        let editor = court.lock().await;
        assert_eq!(editor.playback_time_ms(), 500.0);
        assert_eq!(editor.player(&pid).unwrap().position, Point::new(50.0, 0.0));
    }

    #[tokio::test(start_paused = true)]
    async fn clock_stops_when_playback_finishes() {
        let (mut court, time) = live();
        let (rec, pid) = record_run(&court, &time).await;

        court.play(&rec.id).await;
        tokio::time::sleep(Duration::from_millis(2000)).await;

        assert!(!court.is_clock_running());
        let editor = court.lock().await;
        assert_eq!(editor.playback_status(), PlaybackStatus::Finished);
        assert_eq!(editor.playback_time_ms(), 1000.0);
        assert_eq!(editor.player(&pid).unwrap().position, Point::new(100.0, 0.0));
    }

    #[tokio::test(start_paused = true)]
    async fn replaying_keeps_a_single_clock() {
        let (mut court, time) = live();
        let (rec, _) = record_run(&court, &time).await;

        court.play(&rec.id).await;
        tokio::time::sleep(Duration::from_millis(125)).await;
        court.play(&rec.id).await;
        court.play(&rec.id).await;
        tokio::time::sleep(Duration::from_millis(525)).await;

        // Two live clocks would have advanced twice as far.
        assert_eq!(virtual_ms(&court).await, 500.0);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_freezes_and_resume_continues() {
        let (mut court, time) = live();
        let (rec, pid) = record_run(&court, &time).await;

        court.play(&rec.id).await;
        tokio::time::sleep(Duration::from_millis(225)).await;
        assert!(court.pause().await);
        assert!(!court.is_clock_running());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(virtual_ms(&court).await, 200.0);
        assert_eq!(
            court.lock().await.player(&pid).unwrap().position,
            Point::new(20.0, 0.0)
        );

        assert!(court.resume().await);
        tokio::time::sleep(Duration::from_millis(125)).await;
        assert_eq!(virtual_ms(&court).await, 300.0);
    }

    #[tokio::test(start_paused = true)]
    async fn speed_change_applies_to_next_ticks() {
        let (mut court, time) = live();
        let (rec, _) = record_run(&court, &time).await;

        court.play(&rec.id).await;
        tokio::time::sleep(Duration::from_millis(125)).await;
        assert_eq!(court.set_speed(2.0).await, 2.0);
        assert_eq!(virtual_ms(&court).await, 100.0);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(virtual_ms(&court).await, 300.0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_clock_and_resets() {
        let (mut court, time) = live();
        let (rec, _) = record_run(&court, &time).await;

        court.play(&rec.id).await;
        tokio::time::sleep(Duration::from_millis(125)).await;
        court.stop().await;
        tokio::time::sleep(Duration::from_millis(500)).await;

        let editor = court.lock().await;
        assert_eq!(editor.playback_status(), PlaybackStatus::Idle);
        assert_eq!(editor.playback_time_ms(), 0.0);
        assert!(editor.actions().is_empty());
        assert_eq!(editor.recordings().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_rewinds_and_ticks_again() {
        let (mut court, time) = live();
        let (rec, _) = record_run(&court, &time).await;

        court.play(&rec.id).await;
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert!(court.restart().await);
        tokio::time::sleep(Duration::from_millis(125)).await;
        assert_eq!(virtual_ms(&court).await, 100.0);
    }

    #[tokio::test(start_paused = true)]
    async fn seeking_to_end_finishes_and_stops_clock() {
        let (mut court, time) = live();
        let (rec, _) = record_run(&court, &time).await;

        court.play(&rec.id).await;
        court.seek(5_000.0).await;
        assert!(!court.is_clock_running());
        assert_eq!(court.lock().await.playback_status(), PlaybackStatus::Finished);
    }

    #[tokio::test]
    async fn successful_save_marks_recording_stored() {
        let gateway = Arc::new(MemoryGateway::default());
        let (court, time) = live();
        let court = court.with_gateway(gateway.clone(), 7);
        let mut notices = court.subscribe();

        let (rec, _) = record_run(&court, &time).await;

        let notice = notices.recv().await.unwrap();
        assert_matches!(
            notice,
            PersistenceNotice::Saved { recording_id, stored_id: 1 } if recording_id == rec.id
        );
        assert_eq!(court.lock().await.recording(&rec.id).unwrap().stored_id, Some(1));

        let saved = gateway.saved.lock().unwrap();
        assert_eq!(saved[0].0, 7);
        assert_eq!(saved[0].1.initial_players.as_ref(), Some(&rec.initial_players));
    }

    #[tokio::test]
    async fn failed_save_keeps_local_recording() {
        let (court, time) = live();
        let court = court.with_gateway(Arc::new(DownGateway), 7);
        let mut notices = court.subscribe();

        let (rec, _) = record_run(&court, &time).await;

        let notice = notices.recv().await.unwrap();
        assert_matches!(notice, PersistenceNotice::Failed { message, .. } if message.contains("connection refused"));

        let editor = court.lock().await;
        assert_eq!(editor.recordings().len(), 1);
        assert_eq!(editor.recordings()[0].id, rec.id);
        assert!(editor.recordings()[0].stored_id.is_none());
    }

    #[tokio::test]
    async fn load_team_recordings_adds_stored_ones_once() {
        let gateway = Arc::new(MemoryGateway::default());
        let (source, time) = live();
        let source = source.with_gateway(gateway.clone(), 3);
        let mut notices = source.subscribe();
        record_run(&source, &time).await;
        notices.recv().await.unwrap();

        let (other, _) = live();
        let other = other.with_gateway(gateway, 3);
        assert_eq!(other.load_team_recordings().await.unwrap(), 1);
        assert_eq!(other.load_team_recordings().await.unwrap(), 0);
        assert_eq!(other.lock().await.recordings()[0].stored_id, Some(1));
    }

    #[tokio::test]
    async fn load_without_gateway_is_empty() {
        let (court, _) = live();
        assert_eq!(court.load_team_recordings().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn load_failure_is_reported() {
        let (court, _) = live();
        let court = court.with_gateway(Arc::new(DownGateway), 1);
        assert_matches!(
            court.load_team_recordings().await,
            Err(PersistenceError::Unavailable(_))
        );
    }
}
