//! Roster and result records shared by the core and the storage layer.

use crate::{ManagerId, PlayerId, Position, TeamId, WeekNumber};
use serde::{Deserialize, Serialize};

/// An NFL team; constraints count players per team via its short code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub short_code: String,
}

/// An NFL player in the selectable pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub team_id: TeamId,
    /// Stat-provider identifier, only used to fetch stats.
    pub external_id: Option<String>,
}

/// A competition entrant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    pub id: ManagerId,
    pub name: String,
}

/// Points a player earned in one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub week: WeekNumber,
    pub player_id: PlayerId,
    pub points: f64,
}
