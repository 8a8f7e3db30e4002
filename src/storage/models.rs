//! Data models for the storage layer

pub use crate::models::{Manager, Player, PlayerScore, Team};

use crate::{Position, TeamId};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// A player to be inserted; the database assigns the id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub position: Position,
    pub team_id: TeamId,
    pub external_id: Option<String>,
}

impl ToSql for Position {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Position {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
