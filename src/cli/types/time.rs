//! Time-related types for the playoff season and its weeks.

use crate::error::{FflError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for NFL season years.
///
/// The playoffs are played in January but belong to the previous year's
/// season, which is what stat providers key on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(2025)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Playoff week ordinal (1 = Wild Card ... 4 = Super Bowl).
///
/// Any `u8` can be represented so that out-of-range weeks reach the
/// lineup rules and are rejected there with a readable message.
///
/// # Examples
///
/// ```rust
/// use playoff_ffl::WeekNumber;
///
/// let week = WeekNumber::new(4);
/// assert_eq!(week.label(), Some("Super Bowl"));
/// assert_eq!(week.nfl_week(), Some(21));
/// assert_eq!(WeekNumber::new(5).label(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekNumber(pub u8);

impl WeekNumber {
    pub const PLAYOFF_WEEKS: [WeekNumber; 4] =
        [WeekNumber(1), WeekNumber(2), WeekNumber(3), WeekNumber(4)];

    pub fn new(week: u8) -> Self {
        Self(week)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Round name for the defined playoff weeks.
    pub fn label(&self) -> Option<&'static str> {
        match self.0 {
            1 => Some("Wild Card"),
            2 => Some("Divisional"),
            3 => Some("Conference Championship"),
            4 => Some("Super Bowl"),
            _ => None,
        }
    }

    /// NFL week numbering used by stat providers (18 = Wild Card ... 21 = Super Bowl).
    pub fn nfl_week(&self) -> Option<u8> {
        match self.0 {
            1..=4 => Some(self.0 + 17),
            _ => None,
        }
    }
}

impl Default for WeekNumber {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for WeekNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WeekNumber {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}
