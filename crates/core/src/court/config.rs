//! Tunable engine parameters.

use std::time::Duration;

use crate::error::CoreError;

/// Default minimum displacement (court units) between two recorded samples
/// of the same player.
pub const DEFAULT_MOVEMENT_THRESHOLD: f64 = 5.0;

/// Default minimum gesture length (court units) for an action to be committed.
pub const DEFAULT_MIN_ACTION_LENGTH: f64 = 10.0;

/// Default real-time period between playback ticks.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(50);

/// Default playback speed multiplier.
pub const DEFAULT_SPEED: f64 = 1.0;

/// Slowest accepted playback speed.
pub const MIN_SPEED: f64 = 0.25;

/// Fastest accepted playback speed.
pub const MAX_SPEED: f64 = 4.0;

/// Engine configuration shared by the recorder, the drawing interaction and
/// the playback clock.
#[derive(Debug, Clone, PartialEq)]
pub struct CourtConfig {
    /// A move is recorded only when it is farther than this from the previous
    /// recorded sample of the same player.
    pub movement_threshold: f64,
    /// Gestures at or below this length are discarded as taps.
    pub min_action_length: f64,
    /// Real-time period of one playback tick.
    pub tick_period: Duration,
    /// Speed multiplier a new editor starts with.
    pub default_speed: f64,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            movement_threshold: DEFAULT_MOVEMENT_THRESHOLD,
            min_action_length: DEFAULT_MIN_ACTION_LENGTH,
            tick_period: DEFAULT_TICK_PERIOD,
            default_speed: DEFAULT_SPEED,
        }
    }
}

impl CourtConfig {
    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.movement_threshold.is_finite() || self.movement_threshold < 0.0 {
            return Err(CoreError::Validation(format!(
                "movement threshold must be a finite non-negative number, got {}",
                self.movement_threshold
            )));
        }
        if !self.min_action_length.is_finite() || self.min_action_length < 0.0 {
            return Err(CoreError::Validation(format!(
                "minimum action length must be a finite non-negative number, got {}",
                self.min_action_length
            )));
        }
        if self.tick_period.is_zero() {
            return Err(CoreError::Validation(
                "tick period must be greater than zero".to_string(),
            ));
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.default_speed) {
            return Err(CoreError::Validation(format!(
                "default speed must be between {MIN_SPEED} and {MAX_SPEED}, got {}",
                self.default_speed
            )));
        }
        Ok(())
    }

    /// Tick period in milliseconds as used by the virtual clock.
    pub fn tick_period_ms(&self) -> f64 {
        self.tick_period.as_secs_f64() * 1000.0
    }
}

/// Clamp a requested speed multiplier into the accepted range.
///
/// NaN falls back to [`DEFAULT_SPEED`].
pub fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        DEFAULT_SPEED
    } else {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    }
}
