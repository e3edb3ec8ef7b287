//! Court-surface coordinates and the small amount of math the engine needs.

use serde::{Deserialize, Serialize};

/// A position on the court surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation towards `other`.
    ///
    /// `fraction` is clamped to `0.0..=1.0`.
    pub fn lerp(&self, other: Point, fraction: f64) -> Point {
        let t = fraction.clamp(0.0, 1.0);
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Fraction of the way `t` lies between `start` and `end`.
///
/// Returns `1.0` when the interval is empty so callers snap to the end.
pub fn time_fraction(start_ms: u64, end_ms: u64, t_ms: f64) -> f64 {
    if end_ms <= start_ms {
        return 1.0;
    }
    ((t_ms - start_ms as f64) / (end_ms - start_ms) as f64).clamp(0.0, 1.0)
}
