//! Leaderboard command implementation

use super::print_json;
use crate::{
    standings::{season_standings, Standing, WeekScores},
    storage::LeagueDatabase,
    Result, WeekNumber,
};
use std::collections::BTreeMap;

/// Compute standings from stored lineups and scores
pub fn load_standings(db: &LeagueDatabase) -> Result<Vec<Standing>> {
    let managers = db.get_all_managers()?;
    let lineups = db.get_all_lineups()?;

    let mut scores: BTreeMap<WeekNumber, WeekScores> = BTreeMap::new();
    for score in db.get_all_scores()? {
        scores
            .entry(score.week)
            .or_default()
            .insert(score.player_id, score.points);
    }

    Ok(season_standings(&managers, &lineups, &scores))
}

/// Handle `leaderboard`
pub fn handle_leaderboard(db: &LeagueDatabase, as_json: bool) -> Result<()> {
    let standings = load_standings(db)?;
    if as_json {
        return print_json(&standings);
    }

    println!(
        "{:>4}  {:<20} {:>8} {:>8} {:>8} {:>8} {:>9}",
        "Rank", "Manager", "WC", "DIV", "CONF", "SB", "Total"
    );
    for (rank, standing) in standings.iter().enumerate() {
        let week = |n: u8| {
            standing
                .weekly
                .get(&WeekNumber::new(n))
                .copied()
                .unwrap_or(0.0)
        };
        println!(
            "{:>4}  {:<20} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>9.2}",
            rank + 1,
            standing.name,
            week(1),
            week(2),
            week(3),
            week(4),
            standing.total
        );
    }
    Ok(())
}
