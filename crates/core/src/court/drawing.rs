//! Action drawing interaction: Inactive / Armed(kind) / Drawing.
//!
//! Selecting a kind arms the tool; selecting the same kind again disarms it.
//! A drag from pointer-down to pointer-up commits an action when it is longer
//! than the configured minimum. The tool stays armed after each gesture.

use crate::court::action::{Action, ActionKind};
use crate::court::geometry::Point;
use crate::types::ElementId;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    Inactive,
    Armed(ActionKind),
    Drawing {
        kind: ActionKind,
        origin_player: Option<ElementId>,
        start: Point,
        current: Point,
    },
}

/// Gesture state machine for drawing actions.
#[derive(Debug, Clone)]
pub struct ActionDrawing {
    state: DrawingState,
    min_length: f64,
}

impl ActionDrawing {
    pub fn new(min_length: f64) -> Self {
        Self {
            state: DrawingState::Inactive,
            min_length,
        }
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    /// The armed or in-progress kind, if any.
    pub fn active_kind(&self) -> Option<ActionKind> {
        match &self.state {
            DrawingState::Inactive => None,
            DrawingState::Armed(kind) | DrawingState::Drawing { kind, .. } => Some(*kind),
        }
    }

    /// Arm `kind`, or disarm when it is already the active kind.
    pub fn toggle_kind(&mut self, kind: ActionKind) {
        self.state = if self.active_kind() == Some(kind) {
            DrawingState::Inactive
        } else {
            DrawingState::Armed(kind)
        };
    }

    /// Leave drawing mode entirely.
    pub fn disarm(&mut self) {
        self.state = DrawingState::Inactive;
    }

    /// Begin a gesture. Ignored unless armed.
    ///
    /// `origin_player` is set when the gesture starts on a player marker.
    pub fn pointer_down(&mut self, position: Point, origin_player: Option<ElementId>) -> bool {
        let DrawingState::Armed(kind) = self.state else {
            return false;
        };
        self.state = DrawingState::Drawing {
            kind,
            origin_player,
            start: position,
            current: position,
        };
        true
    }

    /// Update the in-progress gesture. Ignored unless drawing.
    pub fn pointer_move(&mut self, position: Point) {
        if let DrawingState::Drawing { current, .. } = &mut self.state {
            *current = position;
        }
    }

    /// Render-only preview of the in-progress gesture.
    pub fn preview(&self) -> Option<Action> {
        match &self.state {
            DrawingState::Drawing {
                kind,
                origin_player,
                start,
                current,
            } => Some(Action::new(*kind, origin_player.clone(), *start, *current)),
            _ => None,
        }
    }

    /// Finish the gesture.
    ///
    /// Returns the committed action when the drag was long enough. Either way
    /// the tool returns to `Armed(kind)`.
    pub fn pointer_up(&mut self, position: Point) -> Option<Action> {
        let DrawingState::Drawing {
            kind,
            origin_player,
            start,
            ..
        } = std::mem::replace(&mut self.state, DrawingState::Inactive)
        else {
            return None;
        };

        self.state = DrawingState::Armed(kind);

        if start.distance_to(position) <= self.min_length {
            tracing::trace!(kind = kind.as_str(), "Gesture below minimum length, discarded");
            return None;
        }

        Some(Action::new(kind, origin_player, start, position))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn drawing() -> ActionDrawing {
        ActionDrawing::new(10.0)
    }

    #[test]
    fn toggle_arms_switches_and_disarms() {
        let mut d = drawing();
        d.toggle_kind(ActionKind::Pass);
        assert_eq!(d.state(), &DrawingState::Armed(ActionKind::Pass));
        d.toggle_kind(ActionKind::Screen);
        assert_eq!(d.state(), &DrawingState::Armed(ActionKind::Screen));
        d.toggle_kind(ActionKind::Screen);
        assert_eq!(d.state(), &DrawingState::Inactive);
    }

    #[test]
    fn pointer_down_ignored_while_inactive() {
        let mut d = drawing();
        assert!(!d.pointer_down(Point::new(0.0, 0.0), None));
        assert_eq!(d.state(), &DrawingState::Inactive);
        assert!(d.pointer_up(Point::new(100.0, 0.0)).is_none());
    }

    #[test]
    fn short_gesture_discarded_and_stays_armed() {
        let mut d = drawing();
        d.toggle_kind(ActionKind::Cut);
        d.pointer_down(Point::new(100.0, 100.0), None);
        assert!(d.pointer_up(Point::new(105.0, 103.0)).is_none());
        assert_eq!(d.state(), &DrawingState::Armed(ActionKind::Cut));
    }

    #[test]
    fn long_gesture_commits_armed_kind() {
        let mut d = drawing();
        d.toggle_kind(ActionKind::Dribble);
        d.pointer_down(Point::new(100.0, 100.0), Some("p1".to_string()));
        let action = d.pointer_up(Point::new(200.0, 100.0)).unwrap();
        assert_eq!(action.kind, ActionKind::Dribble);
        assert_eq!(action.color, ActionKind::Dribble.color());
        assert_eq!(action.player_id.as_deref(), Some("p1"));
        assert_eq!(action.start, Point::new(100.0, 100.0));
        assert_eq!(action.end, Point::new(200.0, 100.0));
        assert_eq!(d.state(), &DrawingState::Armed(ActionKind::Dribble));
    }

    #[test]
    fn preview_tracks_pointer() {
        let mut d = drawing();
        assert!(d.preview().is_none());
        d.toggle_kind(ActionKind::Pass);
        d.pointer_down(Point::new(0.0, 0.0), None);
        d.pointer_move(Point::new(40.0, 30.0));
        let preview = d.preview().unwrap();
        assert_eq!(preview.end, Point::new(40.0, 30.0));
        assert_matches!(d.state(), DrawingState::Drawing { current, .. } if *current == Point::new(40.0, 30.0));
    }

    #[test]
    fn toggling_same_kind_mid_gesture_disarms() {
        let mut d = drawing();
        d.toggle_kind(ActionKind::Block);
        d.pointer_down(Point::new(0.0, 0.0), None);
        d.toggle_kind(ActionKind::Block);
        assert_eq!(d.state(), &DrawingState::Inactive);
        assert!(d.pointer_up(Point::new(100.0, 0.0)).is_none());
    }
}
