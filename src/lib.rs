//! Playoff Fantasy Football Library
//!
//! Lineup validation and scoring for an NFL playoff fantasy competition.
//! Each manager picks five players (QB, RB, WR, TE, FLEX) per playoff round;
//! a player used in one round is burned for every later round, and each round
//! restricts how many players may come from the same NFL team.
//!
//! ## Features
//!
//! - **Lineup Validation**: Positions, burn rule and per-round team distribution
//! - **Week Locking**: Manual locks and submission deadlines
//! - **Scoring**: Fixed point schedule over raw provider stats
//! - **Stat Providers**: Sleeper and ESPN, fetched concurrently with timeouts
//! - **Database Storage**: Teams, players, managers, lineups and scores in SQLite
//!
//! ## Quick Start
//!
//! ```rust
//! use playoff_ffl::scoring::{calculate_score, RawPlayerStats};
//!
//! let stats = RawPlayerStats::new()
//!     .with("pass_yd", 325.0)
//!     .with("pass_td", 2.0)
//!     .with("pass_int", 1.0);
//! assert_eq!(calculate_score(&stats), 21.0);
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export PLAYOFF_FFL_DB=~/league.db
//! export PLAYOFF_FFL_SEASON=2025
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod lineup;
pub mod models;
pub mod scoring;
pub mod standings;
pub mod stats;
pub mod storage;
pub mod week;

// Re-export commonly used types
pub use cli::types::{ManagerId, PlayerId, Position, Season, Slot, TeamId, WeekNumber};
pub use error::{FflError, Result};

pub const DB_PATH_ENV_VAR: &str = "PLAYOFF_FFL_DB";
pub const SEASON_ENV_VAR: &str = "PLAYOFF_FFL_SEASON";
