//! Command implementations for the playoff league CLI
//!
//! Handlers take an open database so they can run against a scratch file in
//! tests; anything time-dependent takes `now` from the caller.

pub mod leaderboard;
pub mod lineup;
pub mod roster;
pub mod scores;
pub mod week;


use crate::{
    error::FflError, models::Manager, storage::LeagueDatabase, Result, Season, DB_PATH_ENV_VAR,
    SEASON_ENV_VAR,
};
use std::path::PathBuf;

/// Resolve the database path from option, environment variable, or the default location
pub fn resolve_db_path(db: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = db {
        return Ok(path);
    }
    match std::env::var(DB_PATH_ENV_VAR) {
        Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => LeagueDatabase::default_path(),
    }
}

/// Resolve the season from option or environment variable, falling back to the default season
pub fn resolve_season(season: Option<Season>) -> Result<Season> {
    if let Some(season) = season {
        return Ok(season);
    }
    match std::env::var(SEASON_ENV_VAR) {
        Ok(value) => value.parse::<Season>().map_err(|_| FflError::Config {
            message: format!("{} must be a year, got {:?}", SEASON_ENV_VAR, value),
        }),
        Err(_) => Ok(Season::default()),
    }
}

/// Look up a manager by name (case-insensitive)
pub fn find_manager(db: &LeagueDatabase, name: &str) -> Result<Manager> {
    db.get_manager_by_name(name)?
        .ok_or_else(|| FflError::not_found("Manager", name))
}

/// Print a serializable value as pretty JSON
pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
