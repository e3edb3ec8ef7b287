//! Players on the court and the default formation.

use serde::{Deserialize, Serialize};

use crate::court::geometry::Point;
use crate::error::CoreError;
use crate::types::{new_element_id, ElementId};

/// Preset offense coordinates, point guard first.
pub const OFFENSE_FORMATION: [Point; 5] = [
    Point::new(400.0, 450.0),
    Point::new(200.0, 380.0),
    Point::new(600.0, 380.0),
    Point::new(250.0, 200.0),
    Point::new(550.0, 200.0),
];

/// Preset defense coordinates, each between its matchup and the basket.
pub const DEFENSE_FORMATION: [Point; 5] = [
    Point::new(400.0, 400.0),
    Point::new(230.0, 340.0),
    Point::new(570.0, 340.0),
    Point::new(280.0, 180.0),
    Point::new(520.0, 180.0),
];

/// Where a newly added offense player appears.
pub const OFFENSE_SPAWN: Point = Point::new(100.0, 520.0);

/// Where a newly added defense player appears.
pub const DEFENSE_SPAWN: Point = Point::new(700.0, 520.0);

/// Side a player is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Offense,
    Defense,
}

impl PlayerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Offense => "offense",
            Self::Defense => "defense",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "offense" => Ok(Self::Offense),
            "defense" => Ok(Self::Defense),
            _ => Err(CoreError::Validation(format!(
                "Invalid player role '{s}'. Must be one of: offense, defense"
            ))),
        }
    }

    /// Coordinate a player of this role is added at.
    pub fn spawn_point(&self) -> Point {
        match self {
            Self::Offense => OFFENSE_SPAWN,
            Self::Defense => DEFENSE_SPAWN,
        }
    }
}

/// A player marker on the court.
///
/// Serialized flat (`id, x, y, role, number, name`) to match the stored
/// recording shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: ElementId,
    #[serde(flatten)]
    pub position: Point,
    pub role: PlayerRole,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Player {
    pub fn new(role: PlayerRole, number: u32, position: Point) -> Self {
        Self {
            id: new_element_id(),
            position,
            role,
            number: Some(number),
            name: None,
        }
    }
}

/// Build the fixed 5-on-5 starting formation with fresh ids.
///
/// Offense wears 1..=5, defense 6..=10.
pub fn default_formation() -> Vec<Player> {
    let offense = OFFENSE_FORMATION
        .iter()
        .zip(1..)
        .map(|(&pos, number)| Player::new(PlayerRole::Offense, number, pos));
    let defense = DEFENSE_FORMATION
        .iter()
        .zip(6..)
        .map(|(&pos, number)| Player::new(PlayerRole::Defense, number, pos));
    offense.chain(defense).collect()
}

/// Next free jersey number: one above the highest number in use.
pub fn next_jersey_number(players: &[Player]) -> u32 {
    players
        .iter()
        .filter_map(|p| p.number)
        .max()
        .map_or(1, |n| n + 1)
}
