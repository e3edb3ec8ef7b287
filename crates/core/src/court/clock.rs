//! Real-time playback clock.
//!
//! A [`ClockHandle`] owns one spawned task that ticks the editor every
//! configured period until playback stops advancing or the handle is
//! cancelled. Dropping the handle cancels the task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::court::editor::CourtEditor;
use crate::court::playback::TickOutcome;

pub struct ClockHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl ClockHandle {
    /// Start ticking `editor` every `period`.
    ///
    /// The first tick fires one full period after the call.
    pub fn spawn(editor: Arc<Mutex<CourtEditor>>, period: Duration) -> Self {
        let token = CancellationToken::new();
        let task = tokio::spawn(run(editor, period, token.clone()));
        Self { token, task }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the task has exited, either by cancellation or because
    /// playback stopped advancing.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ClockHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn run(editor: Arc<Mutex<CourtEditor>>, period: Duration, token: CancellationToken) {
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = interval.tick() => {}
        }

        let mut editor = editor.lock().await;
        // Cancelled while waiting for the lock: the tick belongs to a
        // clock that has been replaced.
        if token.is_cancelled() {
            break;
        }
        match editor.tick() {
            TickOutcome::Advanced => {}
            TickOutcome::Finished | TickOutcome::NotPlaying => break,
        }
    }

    tracing::trace!("Playback clock exited");
}
