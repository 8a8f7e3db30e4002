//! ID types for players, teams and managers.

use crate::error::{FflError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for player IDs.
///
/// Keeps player references from being mixed up with team or manager IDs
/// when lineups are assembled and validated.
///
/// # Examples
///
/// ```rust
/// use playoff_ffl::PlayerId;
///
/// let player_id = PlayerId::new(42);
/// assert_eq!(player_id.as_i64(), 42);
/// assert_eq!(player_id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

impl PlayerId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Type-safe wrapper for NFL team IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub i64);

impl TeamId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe wrapper for manager (competition entrant) IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ManagerId(pub i64);

impl ManagerId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ManagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_parse() {
        assert_eq!("17".parse::<PlayerId>().unwrap(), PlayerId::new(17));
        assert_eq!(" 9 ".parse::<PlayerId>().unwrap(), PlayerId::new(9));
        assert!("abc".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(TeamId::new(3).to_string(), "3");
        assert_eq!(ManagerId::new(11).to_string(), "11");
    }
}
