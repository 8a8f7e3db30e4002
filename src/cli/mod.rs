//! CLI argument definitions and parsing.

pub mod types;

use crate::{
    core::DEFAULT_TIMEOUT_SECS,
    stats::DEFAULT_CONCURRENCY,
};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use types::{PlayerId, Position, Season, WeekNumber};

/// Where `scores fetch` gets raw stats from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatSourceKind {
    /// Sleeper weekly stats, matched by external id (run `player map-ids` first)
    Sleeper,
    /// ESPN scoreboard and boxscores, matched by name and team
    Espn,
}

#[derive(Debug, Subcommand)]
pub enum WeekCmd {
    /// Show every week with its deadline and current lock state
    List {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Create the four playoff weeks (existing weeks are left untouched)
    Seed,

    /// Manually lock a week; no lineup changes are accepted afterwards
    Lock { week: WeekNumber },

    /// Clear the manual lock (a passed deadline still keeps the week locked)
    Unlock { week: WeekNumber },

    /// Set or clear a week's submission deadline
    Deadline {
        week: WeekNumber,

        /// RFC 3339 instant, e.g. 2026-01-10T18:00:00Z
        #[clap(long, required_unless_present = "clear", conflicts_with = "clear")]
        at: Option<DateTime<Utc>>,

        /// Remove the deadline.
        #[clap(long)]
        clear: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum TeamCmd {
    /// Add an NFL team, or rename the team with this code
    Add {
        name: String,

        /// Short code used for team rules, e.g. BUF.
        #[clap(long, short)]
        code: String,
    },

    /// List teams
    List,
}

#[derive(Debug, Subcommand)]
pub enum PlayerCmd {
    /// Add a player to the selectable pool
    Add {
        name: String,

        /// QB, RB, WR, TE, K or DST.
        #[clap(long, short)]
        position: Position,

        /// Team short code.
        #[clap(long, short)]
        team: String,

        /// Stat provider id (Sleeper player id).
        #[clap(long)]
        external_id: Option<String>,
    },

    /// List players, optionally for one team
    List {
        /// Team short code.
        #[clap(long, short)]
        team: Option<String>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Fill in Sleeper ids by matching name and team against Sleeper's directory
    MapIds {
        /// Report matches without saving them.
        #[clap(long)]
        dry_run: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ManagerCmd {
    /// Register a manager
    Add { name: String },

    /// List managers
    List,
}

#[derive(Debug, clap::Args)]
pub struct SlotArgs {
    #[clap(long)]
    pub qb: PlayerId,
    #[clap(long)]
    pub rb: PlayerId,
    #[clap(long)]
    pub wr: PlayerId,
    #[clap(long)]
    pub te: PlayerId,
    /// RB, WR or TE.
    #[clap(long)]
    pub flex: PlayerId,
}

#[derive(Debug, Subcommand)]
pub enum LineupCmd {
    /// Validate and save a lineup, replacing any earlier one for the week
    Submit {
        /// Manager name.
        #[clap(long, short)]
        manager: String,

        #[clap(long, short)]
        week: WeekNumber,

        #[clap(flatten)]
        slots: SlotArgs,
    },

    /// Validate a lineup without saving it
    Check {
        /// Manager name.
        #[clap(long, short)]
        manager: String,

        #[clap(long, short)]
        week: WeekNumber,

        #[clap(flatten)]
        slots: SlotArgs,
    },

    /// Show lineups for a week, with points where scores exist
    Show {
        #[clap(long, short)]
        week: WeekNumber,

        /// Only this manager's lineup.
        #[clap(long, short)]
        manager: Option<String>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Delete a manager's lineup for an unlocked week
    Remove {
        #[clap(long, short)]
        manager: String,

        #[clap(long, short)]
        week: WeekNumber,
    },
}

#[derive(Debug, Subcommand)]
pub enum ScoresCmd {
    /// Fetch stats for every player in the week's lineups and score them
    Fetch {
        week: WeekNumber,

        #[clap(long, value_enum, default_value_t = StatSourceKind::Sleeper)]
        source: StatSourceKind,

        /// Season year (or set `PLAYOFF_FFL_SEASON` env var).
        #[clap(long, short)]
        season: Option<Season>,

        /// Maximum requests in flight.
        #[clap(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Per-player timeout in seconds.
        #[clap(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,

        /// Store the computed scores.
        #[clap(long)]
        save: bool,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Record a player's points manually
    Set {
        week: WeekNumber,
        player: PlayerId,
        points: f64,
    },

    /// Show stored player scores for a week
    Show {
        week: WeekNumber,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Score a raw stats JSON file without touching the database
    Calc { file: PathBuf },
}

#[derive(Debug, Parser)]
#[clap(
    name = "playoff-ffl",
    about = "Playoff fantasy football: lineups, burn rules and scoring"
)]
pub struct PlayoffFfl {
    /// Database file (or set `PLAYOFF_FFL_DB` env var).
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    /// More log output (-v debug, -vv trace); `RUST_LOG` overrides.
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Playoff weeks, deadlines and locks
    Week {
        #[clap(subcommand)]
        cmd: WeekCmd,
    },
    /// NFL teams
    Team {
        #[clap(subcommand)]
        cmd: TeamCmd,
    },
    /// The selectable player pool
    Player {
        #[clap(subcommand)]
        cmd: PlayerCmd,
    },
    /// Competition entrants
    Manager {
        #[clap(subcommand)]
        cmd: ManagerCmd,
    },
    /// Weekly lineups
    Lineup {
        #[clap(subcommand)]
        cmd: LineupCmd,
    },
    /// Player scoring
    Scores {
        #[clap(subcommand)]
        cmd: ScoresCmd,
    },
    /// Season standings
    Leaderboard {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lineup_submit() {
        let app = PlayoffFfl::try_parse_from([
            "playoff-ffl", "lineup", "submit", "-m", "Alice", "-w", "2", "--qb", "11", "--rb",
            "22", "--wr", "33", "--te", "44", "--flex", "55",
        ])
        .unwrap();

        match app.command {
            Commands::Lineup {
                cmd: LineupCmd::Submit { manager, week, slots },
            } => {
                assert_eq!(manager, "Alice");
                assert_eq!(week, WeekNumber::new(2));
                assert_eq!(slots.flex, PlayerId::new(55));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let app = PlayoffFfl::try_parse_from([
            "playoff-ffl", "leaderboard", "--db", "/tmp/x.db", "-vv",
        ])
        .unwrap();
        assert_eq!(app.db, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(app.verbose, 2);
    }

    #[test]
    fn test_scores_fetch_defaults() {
        let app = PlayoffFfl::try_parse_from(["playoff-ffl", "scores", "fetch", "1"]).unwrap();
        match app.command {
            Commands::Scores {
                cmd:
                    ScoresCmd::Fetch {
                        source,
                        concurrency,
                        timeout,
                        save,
                        ..
                    },
            } => {
                assert_eq!(source, StatSourceKind::Sleeper);
                assert_eq!(concurrency, DEFAULT_CONCURRENCY);
                assert_eq!(timeout, DEFAULT_TIMEOUT_SECS);
                assert!(!save);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_deadline_requires_at_or_clear() {
        assert!(PlayoffFfl::try_parse_from(["playoff-ffl", "week", "deadline", "1"]).is_err());
        assert!(PlayoffFfl::try_parse_from([
            "playoff-ffl", "week", "deadline", "1", "--at", "2026-01-10T18:00:00Z", "--clear",
        ])
        .is_err());

        let app = PlayoffFfl::try_parse_from([
            "playoff-ffl", "week", "deadline", "1", "--at", "2026-01-10T18:00:00Z",
        ])
        .unwrap();
        assert!(matches!(
            app.command,
            Commands::Week {
                cmd: WeekCmd::Deadline { at: Some(_), clear: false, .. }
            }
        ));
    }

    #[test]
    fn test_invalid_position_rejected() {
        assert!(PlayoffFfl::try_parse_from([
            "playoff-ffl", "player", "add", "Someone", "-p", "LB", "-t", "BUF",
        ])
        .is_err());
    }
}
