//! Teams, players and managers

use super::print_json;
use crate::{
    error::FflError,
    lineup::LineupStore,
    models::{Player, Team},
    stats::sleeper::{match_external_ids, SleeperSource},
    storage::{LeagueDatabase, NewPlayer},
    Position, Result, TeamId,
};
use std::collections::HashMap;

fn teams_by_id(db: &LeagueDatabase) -> Result<HashMap<TeamId, Team>> {
    Ok(db
        .get_all_teams()?
        .into_iter()
        .map(|t| (t.id, t))
        .collect())
}

fn team_by_code(db: &LeagueDatabase, code: &str) -> Result<Team> {
    db.get_team_by_code(code)?
        .ok_or_else(|| FflError::not_found("Team", code))
}

/// Handle `team add`
pub fn handle_team_add(db: &mut LeagueDatabase, name: &str, code: &str) -> Result<TeamId> {
    let code = code.trim();
    if code.is_empty() {
        return Err(FflError::Config {
            message: "team code must not be empty".to_string(),
        });
    }
    let id = db.upsert_team(name.trim(), code)?;
    println!("✓ Team {} ({}) saved", name.trim(), code.to_uppercase());
    Ok(id)
}

/// Handle `team list`
pub fn handle_team_list(db: &LeagueDatabase) -> Result<()> {
    for team in db.get_all_teams()? {
        println!("{:<4} {}", team.short_code, team.name);
    }
    Ok(())
}

/// Handle `player add`
pub fn handle_player_add(
    db: &mut LeagueDatabase,
    name: &str,
    position: Position,
    team_code: &str,
    external_id: Option<String>,
) -> Result<()> {
    let team = team_by_code(db, team_code)?;
    let id = db.insert_player(&NewPlayer {
        name: name.trim().to_string(),
        position,
        team_id: team.id,
        external_id,
    })?;
    println!("✓ Added {} {} ({}) as player {}", position, name.trim(), team.short_code, id);
    Ok(())
}

/// Players on the team with `team_code`, or every player
pub fn list_players(db: &LeagueDatabase, team_code: Option<&str>) -> Result<Vec<Player>> {
    match team_code {
        Some(code) => db.find_players_by_team(team_by_code(db, code)?.id),
        None => db.get_all_players(),
    }
}

/// Handle `player list`
pub fn handle_player_list(db: &LeagueDatabase, team_code: Option<&str>, as_json: bool) -> Result<()> {
    let teams = teams_by_id(db)?;
    let players = list_players(db, team_code)?;

    if as_json {
        return print_json(&players);
    }

    for player in players {
        let code = teams
            .get(&player.team_id)
            .map_or("?", |t| t.short_code.as_str());
        println!(
            "{:>5}  {:<3} {:<28} {:<4} {}",
            player.id.as_i64(),
            player.position.as_str(),
            player.name,
            code,
            player.external_id.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

/// Handle `player map-ids`. Returns how many players were matched.
pub async fn handle_map_ids(
    db: &mut LeagueDatabase,
    source: &SleeperSource,
    dry_run: bool,
) -> Result<usize> {
    println!("Fetching Sleeper player directory...");
    let directory = source.fetch_player_directory().await?;
    let players = db.get_all_players()?;
    let teams = teams_by_id(db)?;

    let matched = match_external_ids(&players, &teams, &directory);
    let names: HashMap<_, _> = players.iter().map(|p| (p.id, p.name.as_str())).collect();
    for (player_id, external_id) in &matched {
        if !dry_run {
            db.set_external_id(*player_id, Some(external_id))?;
        }
        println!(
            "✓ {} -> {}",
            names.get(player_id).copied().unwrap_or_default(),
            external_id
        );
    }

    let unmatched = players.len() - matched.len();
    println!(
        "Mapped: {}, Unmapped: {}, Total: {}{}",
        matched.len(),
        unmatched,
        players.len(),
        if dry_run { " (dry run, nothing saved)" } else { "" }
    );
    Ok(matched.len())
}

/// Handle `manager add`
pub fn handle_manager_add(db: &mut LeagueDatabase, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FflError::Config {
            message: "manager name must not be empty".to_string(),
        });
    }
    let id = db.insert_manager(name)?;
    println!("✓ Manager {} registered (id {})", name, id);
    Ok(())
}

/// Handle `manager list`
pub fn handle_manager_list(db: &LeagueDatabase) -> Result<()> {
    for manager in db.get_all_managers()? {
        println!("{:>4}  {}", manager.id.as_i64(), manager.name);
    }
    Ok(())
}
