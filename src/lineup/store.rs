//! Lookup and persistence collaborator for lineup workflows.

use super::Lineup;
use crate::{
    models::{Player, Team},
    week::Week,
    ManagerId, PlayerId, Result, TeamId, WeekNumber,
};

/// Data access the lineup workflows need.
///
/// The validation core never calls this directly; adapters use it to
/// fetch everything up front so the rules run over plain data.
pub trait LineupStore {
    fn find_week(&self, number: WeekNumber) -> Result<Option<Week>>;

    fn find_player(&self, id: PlayerId) -> Result<Option<Player>>;

    fn find_players_by_team(&self, team_id: TeamId) -> Result<Vec<Player>>;

    fn find_team(&self, id: TeamId) -> Result<Option<Team>>;

    /// All of a manager's lineups in weeks strictly earlier than `week`.
    fn find_lineups_for_manager_before_week(
        &self,
        manager_id: ManagerId,
        week: WeekNumber,
    ) -> Result<Vec<Lineup>>;

    /// Create or replace the lineup for its (manager, week).
    fn upsert_lineup(&mut self, lineup: &Lineup) -> Result<()>;

    /// Returns whether a lineup existed.
    fn delete_lineup(&mut self, manager_id: ManagerId, week: WeekNumber) -> Result<bool>;
}
