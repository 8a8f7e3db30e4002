//! Database schema and connection management

use crate::error::{FflError, Result};
use dirs::data_dir;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Database connection manager for the competition
pub struct LeagueDatabase {
    pub(crate) conn: Connection,
}

impl LeagueDatabase {
    /// Open the database at the default location, creating tables if needed
    pub fn new() -> Result<Self> {
        Self::open(&Self::default_path()?)
    }

    /// Open (or create) a database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Create a fresh in-memory database, mainly for tests
    pub fn new_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Default database path under the user's data directory
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = data_dir().ok_or_else(|| FflError::Config {
            message: "Could not determine data directory".to_string(),
        })?;
        Ok(data_dir.join("playoff-ffl").join("league.db"))
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS teams (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                short_code TEXT NOT NULL UNIQUE
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                position TEXT NOT NULL,
                team_id INTEGER NOT NULL,
                external_id TEXT,
                FOREIGN KEY (team_id) REFERENCES teams(id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS managers (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            )",
            [],
        )?;

        // Lock state is derived from is_locked and deadline at read time
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS weeks (
                number INTEGER PRIMARY KEY,
                label TEXT NOT NULL,
                deadline TEXT,
                is_locked INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS lineups (
                manager_id INTEGER NOT NULL,
                week_number INTEGER NOT NULL,
                qb_id INTEGER NOT NULL,
                rb_id INTEGER NOT NULL,
                wr_id INTEGER NOT NULL,
                te_id INTEGER NOT NULL,
                flex_id INTEGER NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (week_number, manager_id),
                FOREIGN KEY (manager_id) REFERENCES managers(id),
                FOREIGN KEY (week_number) REFERENCES weeks(number),
                FOREIGN KEY (qb_id) REFERENCES players(id),
                FOREIGN KEY (rb_id) REFERENCES players(id),
                FOREIGN KEY (wr_id) REFERENCES players(id),
                FOREIGN KEY (te_id) REFERENCES players(id),
                FOREIGN KEY (flex_id) REFERENCES players(id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS player_scores (
                week_number INTEGER NOT NULL,
                player_id INTEGER NOT NULL,
                points REAL NOT NULL,
                PRIMARY KEY (week_number, player_id),
                FOREIGN KEY (week_number) REFERENCES weeks(number),
                FOREIGN KEY (player_id) REFERENCES players(id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_players_team ON players(team_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_lineups_manager ON lineups(manager_id, week_number)",
            [],
        )?;

        Ok(())
    }
}
