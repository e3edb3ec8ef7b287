//! Session state: the live player layout, drawn actions and selection.
//!
//! Every operation is a total in-memory edit. Unknown ids are ignored.

use crate::court::action::Action;
use crate::court::geometry::Point;
use crate::court::player::{default_formation, next_jersey_number, Player, PlayerRole};
use crate::types::ElementId;

/// Single source of truth for what is currently on the court.
#[derive(Debug, Clone)]
pub struct CourtSession {
    players: Vec<Player>,
    actions: Vec<Action>,
    selected_player: Option<ElementId>,
}

impl Default for CourtSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CourtSession {
    /// Start a session on the default formation with no actions.
    pub fn new() -> Self {
        Self {
            players: default_formation(),
            actions: Vec::new(),
            selected_player: None,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn selected_player(&self) -> Option<&str> {
        self.selected_player.as_deref()
    }

    /// Add a player at the role's spawn point with the next jersey number.
    pub fn add_player(&mut self, role: PlayerRole) -> &Player {
        let number = next_jersey_number(&self.players);
        self.players.push(Player::new(role, number, role.spawn_point()));
        &self.players[self.players.len() - 1]
    }

    /// Remove a player. Returns `false` when the id is unknown.
    pub fn remove_player(&mut self, id: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        if self.selected_player.as_deref() == Some(id) {
            self.selected_player = None;
        }
        self.players.len() != before
    }

    /// Move a player. Returns `false` when the id is unknown.
    pub fn move_player(&mut self, id: &str, position: Point) -> bool {
        match self.players.iter_mut().find(|p| p.id == id) {
            Some(player) => {
                player.position = position;
                true
            }
            None => false,
        }
    }

    /// Select a player, or clear the selection with `None`.
    ///
    /// Selecting an unknown id clears the selection.
    pub fn select_player(&mut self, id: Option<&str>) {
        self.selected_player = id
            .filter(|id| self.players.iter().any(|p| p.id == *id))
            .map(str::to_string);
    }

    pub fn push_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Remove one action. Returns `false` when the id is unknown.
    pub fn remove_action(&mut self, id: &str) -> bool {
        let before = self.actions.len();
        self.actions.retain(|a| a.id != id);
        self.actions.len() != before
    }

    pub fn clear_actions(&mut self) {
        self.actions.clear();
    }

    /// Restore the default formation, clear actions and selection.
    pub fn reset(&mut self) {
        self.players = default_formation();
        self.actions.clear();
        self.selected_player = None;
    }

    /// Replace the layout and actions wholesale (playback frames).
    pub(crate) fn replace(&mut self, players: Vec<Player>, actions: Vec<Action>) {
        self.players = players;
        self.actions = actions;
    }

    pub(crate) fn set_actions(&mut self, actions: Vec<Action>) {
        self.actions = actions;
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::court::action::ActionKind;
    use crate::court::player::{DEFENSE_SPAWN, OFFENSE_SPAWN};

    fn count(session: &CourtSession, role: PlayerRole) -> usize {
        session.players().iter().filter(|p| p.role == role).count()
    }

    #[test]
    fn new_session_has_default_formation() {
        let session = CourtSession::new();
        assert_eq!(count(&session, PlayerRole::Offense), 5);
        assert_eq!(count(&session, PlayerRole::Defense), 5);
        assert!(session.actions().is_empty());
        assert!(session.selected_player().is_none());
    }

    #[test]
    fn add_player_uses_spawn_and_next_number() {
        let mut session = CourtSession::new();
        let offense = session.add_player(PlayerRole::Offense).clone();
        assert_eq!(offense.position, OFFENSE_SPAWN);
        assert_eq!(offense.number, Some(11));

        let defense = session.add_player(PlayerRole::Defense).clone();
        assert_eq!(defense.position, DEFENSE_SPAWN);
        assert_eq!(defense.number, Some(12));
        assert_eq!(session.players().len(), 12);
    }

    #[test]
    fn remove_selected_player_clears_selection() {
        let mut session = CourtSession::new();
        let id = session.players()[2].id.clone();
        session.select_player(Some(&id));
        assert_eq!(session.selected_player(), Some(id.as_str()));

        assert!(session.remove_player(&id));
        assert!(session.selected_player().is_none());
        assert_eq!(session.players().len(), 9);
    }

    #[test]
    fn remove_unknown_player_is_noop() {
        let mut session = CourtSession::new();
        let other = session.players()[0].id.clone();
        session.select_player(Some(&other));
        assert!(!session.remove_player("nope"));
        assert_eq!(session.players().len(), 10);
        assert_eq!(session.selected_player(), Some(other.as_str()));
    }

    #[test]
    fn move_player_updates_position() {
        let mut session = CourtSession::new();
        let id = session.players()[0].id.clone();
        assert!(session.move_player(&id, Point::new(1.0, 2.0)));
        assert_eq!(session.player(&id).unwrap().position, Point::new(1.0, 2.0));
        assert!(!session.move_player("ghost", Point::new(0.0, 0.0)));
    }

    #[test]
    fn select_unknown_player_clears_selection() {
        let mut session = CourtSession::new();
        let id = session.players()[0].id.clone();
        session.select_player(Some(&id));
        session.select_player(Some("ghost"));
        assert!(session.selected_player().is_none());
    }

    #[test]
    fn reset_restores_formation_and_clears_actions() {
        let mut session = CourtSession::new();
        let id = session.players()[0].id.clone();
        session.move_player(&id, Point::new(0.0, 0.0));
        session.add_player(PlayerRole::Defense);
        session.select_player(Some(&id));
        session.push_action(Action::new(
            ActionKind::Pass,
            None,
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        ));

        session.reset();

        assert_eq!(count(&session, PlayerRole::Offense), 5);
        assert_eq!(count(&session, PlayerRole::Defense), 5);
        assert!(session.actions().is_empty());
        assert!(session.selected_player().is_none());
    }

    #[test]
    fn remove_action_by_id() {
        let mut session = CourtSession::new();
        let action = Action::new(
            ActionKind::Cut,
            None,
            Point::new(0.0, 0.0),
            Point::new(0.0, 50.0),
        );
        let id = action.id.clone();
        session.push_action(action);
        assert!(!session.remove_action("other"));
        assert!(session.remove_action(&id));
        assert!(session.actions().is_empty());
    }
}
