//! Type-safe wrappers and enums for players, lineups and weeks.

pub mod ids;
pub mod position;
pub mod time;

pub use ids::{ManagerId, PlayerId, TeamId};
pub use position::{Position, Slot};
pub use time::{Season, WeekNumber};
