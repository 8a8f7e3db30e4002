//! Basic database query operations

use super::{models::*, schema::LeagueDatabase};
use crate::{
    lineup::{Lineup, LineupSlots, LineupStore},
    week::{default_weeks, Week},
    ManagerId, PlayerId, Result, TeamId, WeekNumber,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use std::collections::BTreeMap;

const PLAYER_COLUMNS: &str = "id, name, position, team_id, external_id";
const LINEUP_COLUMNS: &str = "manager_id, week_number, qb_id, rb_id, wr_id, te_id, flex_id";

impl LeagueDatabase {
    // --- Teams ---

    /// Insert a team, or rename the team that already has this short code
    pub fn upsert_team(&mut self, name: &str, short_code: &str) -> Result<TeamId> {
        let short_code = short_code.trim().to_uppercase();
        self.conn.execute(
            "INSERT INTO teams (name, short_code) VALUES (?, ?)
             ON CONFLICT(short_code) DO UPDATE SET name = excluded.name",
            params![name, short_code],
        )?;
        let id: i64 = self.conn.query_row(
            "SELECT id FROM teams WHERE short_code = ?",
            params![short_code],
            |row| row.get(0),
        )?;
        Ok(TeamId::new(id))
    }

    pub fn get_team(&self, id: TeamId) -> Result<Option<Team>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, short_code FROM teams WHERE id = ?",
                params![id.as_i64()],
                row_to_team,
            )
            .optional()?)
    }

    pub fn get_team_by_code(&self, short_code: &str) -> Result<Option<Team>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, short_code FROM teams WHERE short_code = ?",
                params![short_code.trim().to_uppercase()],
                row_to_team,
            )
            .optional()?)
    }

    pub fn get_all_teams(&self) -> Result<Vec<Team>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, short_code FROM teams ORDER BY short_code")?;
        let rows = stmt.query_map([], row_to_team)?;

        let mut teams = Vec::new();
        for row in rows {
            teams.push(row?);
        }
        Ok(teams)
    }

    // --- Players ---

    pub fn insert_player(&mut self, player: &NewPlayer) -> Result<PlayerId> {
        self.conn.execute(
            "INSERT INTO players (name, position, team_id, external_id) VALUES (?, ?, ?, ?)",
            params![
                player.name,
                player.position,
                player.team_id.as_i64(),
                player.external_id
            ],
        )?;
        Ok(PlayerId::new(self.conn.last_insert_rowid()))
    }

    pub fn get_player(&self, id: PlayerId) -> Result<Option<Player>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?"),
                params![id.as_i64()],
                row_to_player,
            )
            .optional()?)
    }

    pub fn get_players_by_team(&self, team_id: TeamId) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE team_id = ? ORDER BY name"
        ))?;
        let rows = stmt.query_map(params![team_id.as_i64()], row_to_player)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Get all players from the database
    pub fn get_all_players(&self) -> Result<Vec<Player>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY name"))?;
        let rows = stmt.query_map([], row_to_player)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Back-fill (or clear) a player's stat-provider id. Returns whether the player exists.
    pub fn set_external_id(&mut self, id: PlayerId, external_id: Option<&str>) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE players SET external_id = ? WHERE id = ?",
            params![external_id, id.as_i64()],
        )?;
        Ok(rows_affected > 0)
    }

    // --- Managers ---

    pub fn insert_manager(&mut self, name: &str) -> Result<ManagerId> {
        self.conn
            .execute("INSERT INTO managers (name) VALUES (?)", params![name.trim()])?;
        Ok(ManagerId::new(self.conn.last_insert_rowid()))
    }

    pub fn get_manager_by_name(&self, name: &str) -> Result<Option<Manager>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name FROM managers WHERE name = ? COLLATE NOCASE",
                params![name.trim()],
                row_to_manager,
            )
            .optional()?)
    }

    pub fn get_all_managers(&self) -> Result<Vec<Manager>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM managers ORDER BY name")?;
        let rows = stmt.query_map([], row_to_manager)?;

        let mut managers = Vec::new();
        for row in rows {
            managers.push(row?);
        }
        Ok(managers)
    }

    // --- Weeks ---

    pub fn upsert_week(&mut self, week: &Week) -> Result<()> {
        self.conn.execute(
            "INSERT INTO weeks (number, label, deadline, is_locked) VALUES (?, ?, ?, ?)
             ON CONFLICT(number) DO UPDATE SET
                label = excluded.label,
                deadline = excluded.deadline,
                is_locked = excluded.is_locked",
            params![
                week.number.as_u8(),
                week.label,
                week.deadline,
                week.is_locked
            ],
        )?;
        Ok(())
    }

    /// Create the four playoff weeks, leaving existing ones untouched.
    /// Returns how many were created.
    pub fn seed_weeks(&mut self) -> Result<usize> {
        let mut created = 0;
        for week in default_weeks() {
            created += self.conn.execute(
                "INSERT OR IGNORE INTO weeks (number, label, deadline, is_locked)
                 VALUES (?, ?, NULL, 0)",
                params![week.number.as_u8(), week.label],
            )?;
        }
        Ok(created)
    }

    pub fn get_week(&self, number: WeekNumber) -> Result<Option<Week>> {
        Ok(self
            .conn
            .query_row(
                "SELECT number, label, deadline, is_locked FROM weeks WHERE number = ?",
                params![number.as_u8()],
                row_to_week,
            )
            .optional()?)
    }

    pub fn get_all_weeks(&self) -> Result<Vec<Week>> {
        let mut stmt = self
            .conn
            .prepare("SELECT number, label, deadline, is_locked FROM weeks ORDER BY number")?;
        let rows = stmt.query_map([], row_to_week)?;

        let mut weeks = Vec::new();
        for row in rows {
            weeks.push(row?);
        }
        Ok(weeks)
    }

    /// Set or clear the manual lock flag. Returns whether the week exists.
    pub fn set_week_locked(&mut self, number: WeekNumber, locked: bool) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE weeks SET is_locked = ? WHERE number = ?",
            params![locked, number.as_u8()],
        )?;
        Ok(rows_affected > 0)
    }

    /// Set or clear the submission deadline. Returns whether the week exists.
    pub fn set_week_deadline(
        &mut self,
        number: WeekNumber,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE weeks SET deadline = ? WHERE number = ?",
            params![deadline, number.as_u8()],
        )?;
        Ok(rows_affected > 0)
    }

    // --- Lineups ---

    /// Insert or replace the lineup for its (week, manager), keeping the original created_at
    pub fn save_lineup(&mut self, lineup: &Lineup) -> Result<()> {
        let now = Utc::now().timestamp();
        let s = &lineup.slots;
        self.conn.execute(
            "INSERT INTO lineups
             (manager_id, week_number, qb_id, rb_id, wr_id, te_id, flex_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(week_number, manager_id) DO UPDATE SET
                qb_id = excluded.qb_id,
                rb_id = excluded.rb_id,
                wr_id = excluded.wr_id,
                te_id = excluded.te_id,
                flex_id = excluded.flex_id,
                updated_at = excluded.updated_at",
            params![
                lineup.manager_id.as_i64(),
                lineup.week.as_u8(),
                s.qb.as_i64(),
                s.rb.as_i64(),
                s.wr.as_i64(),
                s.te.as_i64(),
                s.flex.as_i64(),
                now,
                now
            ],
        )?;
        Ok(())
    }

    pub fn get_lineup(&self, manager_id: ManagerId, week: WeekNumber) -> Result<Option<Lineup>> {
        Ok(self
            .conn
            .query_row(
                &format!(
                    "SELECT {LINEUP_COLUMNS} FROM lineups WHERE manager_id = ? AND week_number = ?"
                ),
                params![manager_id.as_i64(), week.as_u8()],
                row_to_lineup,
            )
            .optional()?)
    }

    pub fn get_lineups_for_week(&self, week: WeekNumber) -> Result<Vec<Lineup>> {
        self.query_lineups(
            &format!("SELECT {LINEUP_COLUMNS} FROM lineups WHERE week_number = ? ORDER BY manager_id"),
            params![week.as_u8()],
        )
    }

    pub fn get_lineups_before_week(
        &self,
        manager_id: ManagerId,
        week: WeekNumber,
    ) -> Result<Vec<Lineup>> {
        self.query_lineups(
            &format!(
                "SELECT {LINEUP_COLUMNS} FROM lineups
                 WHERE manager_id = ? AND week_number < ?
                 ORDER BY week_number"
            ),
            params![manager_id.as_i64(), week.as_u8()],
        )
    }

    pub fn get_all_lineups(&self) -> Result<Vec<Lineup>> {
        self.query_lineups(
            &format!("SELECT {LINEUP_COLUMNS} FROM lineups ORDER BY week_number, manager_id"),
            [],
        )
    }

    pub fn remove_lineup(&mut self, manager_id: ManagerId, week: WeekNumber) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM lineups WHERE manager_id = ? AND week_number = ?",
            params![manager_id.as_i64(), week.as_u8()],
        )?;
        Ok(rows_affected > 0)
    }

    fn query_lineups(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Lineup>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_lineup)?;

        let mut lineups = Vec::new();
        for row in rows {
            lineups.push(row?);
        }
        Ok(lineups)
    }

    // --- Scores ---

    pub fn upsert_player_score(
        &mut self,
        week: WeekNumber,
        player_id: PlayerId,
        points: f64,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO player_scores (week_number, player_id, points) VALUES (?, ?, ?)
             ON CONFLICT(week_number, player_id) DO UPDATE SET points = excluded.points",
            params![week.as_u8(), player_id.as_i64(), points],
        )?;
        Ok(())
    }

    /// Save a batch of scores for one week atomically
    pub fn upsert_player_scores(
        &mut self,
        week: WeekNumber,
        scores: &BTreeMap<PlayerId, f64>,
    ) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO player_scores (week_number, player_id, points) VALUES (?, ?, ?)
                 ON CONFLICT(week_number, player_id) DO UPDATE SET points = excluded.points",
            )?;
            for (player_id, points) in scores {
                stmt.execute(params![week.as_u8(), player_id.as_i64(), points])?;
            }
        }
        tx.commit()?;
        Ok(scores.len())
    }

    pub fn get_scores_for_week(&self, week: WeekNumber) -> Result<BTreeMap<PlayerId, f64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT player_id, points FROM player_scores WHERE week_number = ?")?;
        let rows = stmt.query_map(params![week.as_u8()], |row| {
            Ok((PlayerId::new(row.get(0)?), row.get::<_, f64>(1)?))
        })?;

        let mut scores = BTreeMap::new();
        for row in rows {
            let (player_id, points) = row?;
            scores.insert(player_id, points);
        }
        Ok(scores)
    }

    pub fn get_all_scores(&self) -> Result<Vec<PlayerScore>> {
        let mut stmt = self.conn.prepare(
            "SELECT week_number, player_id, points FROM player_scores
             ORDER BY week_number, player_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PlayerScore {
                week: WeekNumber::new(row.get(0)?),
                player_id: PlayerId::new(row.get(1)?),
                points: row.get(2)?,
            })
        })?;

        let mut scores = Vec::new();
        for row in rows {
            scores.push(row?);
        }
        Ok(scores)
    }

    /// Clear all data from the database (useful for starting fresh)
    pub fn clear_all_data(&mut self) -> Result<()> {
        // Dependents first due to foreign keys
        self.conn.execute("DELETE FROM player_scores", [])?;
        self.conn.execute("DELETE FROM lineups", [])?;
        self.conn.execute("DELETE FROM weeks", [])?;
        self.conn.execute("DELETE FROM managers", [])?;
        self.conn.execute("DELETE FROM players", [])?;
        self.conn.execute("DELETE FROM teams", [])?;
        Ok(())
    }
}

impl LineupStore for LeagueDatabase {
    fn find_week(&self, number: WeekNumber) -> Result<Option<Week>> {
        self.get_week(number)
    }

    fn find_player(&self, id: PlayerId) -> Result<Option<Player>> {
        self.get_player(id)
    }

    fn find_players_by_team(&self, team_id: TeamId) -> Result<Vec<Player>> {
        self.get_players_by_team(team_id)
    }

    fn find_team(&self, id: TeamId) -> Result<Option<Team>> {
        self.get_team(id)
    }

    fn find_lineups_for_manager_before_week(
        &self,
        manager_id: ManagerId,
        week: WeekNumber,
    ) -> Result<Vec<Lineup>> {
        self.get_lineups_before_week(manager_id, week)
    }

    fn upsert_lineup(&mut self, lineup: &Lineup) -> Result<()> {
        self.save_lineup(lineup)
    }

    fn delete_lineup(&mut self, manager_id: ManagerId, week: WeekNumber) -> Result<bool> {
        self.remove_lineup(manager_id, week)
    }
}

fn row_to_team(row: &Row) -> rusqlite::Result<Team> {
    Ok(Team {
        id: TeamId::new(row.get(0)?),
        name: row.get(1)?,
        short_code: row.get(2)?,
    })
}

fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: PlayerId::new(row.get(0)?),
        name: row.get(1)?,
        position: row.get(2)?,
        team_id: TeamId::new(row.get(3)?),
        external_id: row.get(4)?,
    })
}

fn row_to_manager(row: &Row) -> rusqlite::Result<Manager> {
    Ok(Manager {
        id: ManagerId::new(row.get(0)?),
        name: row.get(1)?,
    })
}

fn row_to_week(row: &Row) -> rusqlite::Result<Week> {
    Ok(Week {
        number: WeekNumber::new(row.get(0)?),
        label: row.get(1)?,
        deadline: row.get(2)?,
        is_locked: row.get(3)?,
    })
}

fn row_to_lineup(row: &Row) -> rusqlite::Result<Lineup> {
    Ok(Lineup {
        manager_id: ManagerId::new(row.get(0)?),
        week: WeekNumber::new(row.get(1)?),
        slots: LineupSlots {
            qb: PlayerId::new(row.get(2)?),
            rb: PlayerId::new(row.get(3)?),
            wr: PlayerId::new(row.get(4)?),
            te: PlayerId::new(row.get(5)?),
            flex: PlayerId::new(row.get(6)?),
        },
    })
}
