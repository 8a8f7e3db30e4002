//! Player positions and lineup slots.

use crate::error::FflError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// NFL player positions.
///
/// Only QB, RB, WR and TE can appear in a lineup; kickers and defenses
/// are tracked so the player pool mirrors real rosters.
///
/// # Examples
///
/// ```rust
/// use playoff_ffl::Position;
///
/// let qb: Position = "qb".parse().unwrap();
/// assert_eq!(qb, Position::QB);
/// assert_eq!(Position::DST.to_string(), "DST");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DST,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DST => "DST",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Position {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "K" => Ok(Position::K),
            "DST" | "D/ST" | "DEF" => Ok(Position::DST),
            _ => Err(FflError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}

/// The five lineup slots, in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    Qb,
    Rb,
    Wr,
    Te,
    Flex,
}

impl Slot {
    pub const ALL: [Slot; 5] = [Slot::Qb, Slot::Rb, Slot::Wr, Slot::Te, Slot::Flex];

    /// Whether a player at `position` may fill this slot.
    pub fn accepts(&self, position: Position) -> bool {
        match self {
            Slot::Qb => position == Position::QB,
            Slot::Rb => position == Position::RB,
            Slot::Wr => position == Position::WR,
            Slot::Te => position == Position::TE,
            Slot::Flex => matches!(position, Position::RB | Position::WR | Position::TE),
        }
    }

    /// Human-readable description of who may fill the slot.
    pub fn requirement(&self) -> &'static str {
        match self {
            Slot::Qb => "a QB",
            Slot::Rb => "a RB",
            Slot::Wr => "a WR",
            Slot::Te => "a TE",
            Slot::Flex => "a RB, WR, or TE",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Slot::Qb => "QB",
            Slot::Rb => "RB",
            Slot::Wr => "WR",
            Slot::Te => "TE",
            Slot::Flex => "FLEX",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Slot {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(Slot::Qb),
            "RB" => Ok(Slot::Rb),
            "WR" => Ok(Slot::Wr),
            "TE" => Ok(Slot::Te),
            "FLEX" => Ok(Slot::Flex),
            _ => Err(FflError::InvalidSlot {
                slot: s.to_string(),
            }),
        }
    }
}
