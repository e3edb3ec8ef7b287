//! Tactical actions drawn on the court and their rendering styles.

use serde::{Deserialize, Serialize};

use crate::court::geometry::Point;
use crate::error::CoreError;
use crate::types::{new_element_id, ElementId};

// ---------------------------------------------------------------------------
// Action kinds
// ---------------------------------------------------------------------------

/// The tactical meaning of a drawn action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Pass,
    Shoot,
    Cut,
    Block,
    Screen,
    Dribble,
}

/// All valid action kind strings.
pub const VALID_ACTION_KINDS: &[&str] = &["pass", "shoot", "cut", "block", "screen", "dribble"];

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        Self::Pass,
        Self::Shoot,
        Self::Cut,
        Self::Block,
        Self::Screen,
        Self::Dribble,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Shoot => "shoot",
            Self::Cut => "cut",
            Self::Block => "block",
            Self::Screen => "screen",
            Self::Dribble => "dribble",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "pass" => Ok(Self::Pass),
            "shoot" => Ok(Self::Shoot),
            "cut" => Ok(Self::Cut),
            "block" => Ok(Self::Block),
            "screen" => Ok(Self::Screen),
            "dribble" => Ok(Self::Dribble),
            _ => Err(CoreError::Validation(format!(
                "Invalid action kind '{s}'. Must be one of: {}",
                VALID_ACTION_KINDS.join(", ")
            ))),
        }
    }

    /// Hex color every action of this kind is drawn with.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Pass => "#3b82f6",
            Self::Shoot => "#ef4444",
            Self::Cut => "#22c55e",
            Self::Block => "#a855f7",
            Self::Screen => "#f97316",
            Self::Dribble => "#eab308",
        }
    }

    /// Stroke style every action of this kind is drawn with.
    pub fn stroke(&self) -> StrokeStyle {
        use StrokePattern::*;
        let (pattern, arrowhead, end_marker) = match self {
            Self::Pass => (Dashed, true, false),
            Self::Shoot => (Solid, true, false),
            Self::Cut => (Solid, true, false),
            Self::Block => (Solid, false, false),
            Self::Screen => (Solid, false, true),
            Self::Dribble => (Dotted, true, false),
        };
        StrokeStyle {
            pattern,
            arrowhead,
            end_marker,
        }
    }
}

// ---------------------------------------------------------------------------
// Stroke style
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokePattern {
    Solid,
    Dashed,
    Dotted,
}

/// How an action line is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrokeStyle {
    pub pattern: StrokePattern,
    /// Draw an arrowhead at the end coordinate.
    pub arrowhead: bool,
    /// Draw a small marker at the end coordinate (screens).
    pub end_marker: bool,
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A committed tactical annotation.
///
/// `timestamp_ms` is the offset from recording start, or 0 for actions
/// drawn outside a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ActionRecord", into = "ActionRecord")]
pub struct Action {
    pub id: ElementId,
    pub kind: ActionKind,
    pub player_id: Option<ElementId>,
    pub start: Point,
    pub end: Point,
    pub timestamp_ms: u64,
    pub color: String,
}

impl Action {
    /// Build an action with a fresh id and the kind's color.
    pub fn new(kind: ActionKind, player_id: Option<ElementId>, start: Point, end: Point) -> Self {
        Self {
            id: new_element_id(),
            kind,
            player_id,
            start,
            end,
            timestamp_ms: 0,
            color: kind.color().to_string(),
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }
}

/// Flat storage shape of an [`Action`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActionRecord {
    id: ElementId,
    kind: ActionKind,
    #[serde(default)]
    player_id: Option<ElementId>,
    start_x: f64,
    start_y: f64,
    end_x: f64,
    end_y: f64,
    timestamp_ms: u64,
    #[serde(default)]
    color: Option<String>,
}

impl From<ActionRecord> for Action {
    fn from(r: ActionRecord) -> Self {
        Self {
            id: r.id,
            kind: r.kind,
            player_id: r.player_id,
            start: Point::new(r.start_x, r.start_y),
            end: Point::new(r.end_x, r.end_y),
            timestamp_ms: r.timestamp_ms,
            color: r.color.unwrap_or_else(|| r.kind.color().to_string()),
        }
    }
}

impl From<Action> for ActionRecord {
    fn from(a: Action) -> Self {
        Self {
            id: a.id,
            kind: a.kind,
            player_id: a.player_id,
            start_x: a.start.x,
            start_y: a.start.y,
            end_x: a.end.x,
            end_y: a.end.y,
            timestamp_ms: a.timestamp_ms,
            color: Some(a.color),
        }
    }
}
