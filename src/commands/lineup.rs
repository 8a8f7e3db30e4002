//! Lineup submission, checking and display

use super::{find_manager, print_json};
use crate::{
    cli::SlotArgs,
    lineup::{remove_lineup, submit_lineup, validate_submission, Lineup, LineupSlots},
    standings::week_score,
    storage::LeagueDatabase,
    Result, Slot, WeekNumber,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

impl From<SlotArgs> for LineupSlots {
    fn from(args: SlotArgs) -> Self {
        Self {
            qb: args.qb,
            rb: args.rb,
            wr: args.wr,
            te: args.te,
            flex: args.flex,
        }
    }
}

/// Handle `lineup submit`
pub fn handle_lineup_submit(
    db: &mut LeagueDatabase,
    manager: &str,
    week: WeekNumber,
    slots: LineupSlots,
    now: DateTime<Utc>,
) -> Result<()> {
    let manager = find_manager(db, manager)?;
    let lineup = Lineup {
        manager_id: manager.id,
        week,
        slots,
    };

    submit_lineup(db, &lineup, now)?;
    println!("✓ Lineup saved for {} (week {})", manager.name, week);
    Ok(())
}

/// Handle `lineup check`. Returns whether the lineup is valid.
pub fn handle_lineup_check(
    db: &LeagueDatabase,
    manager: &str,
    week: WeekNumber,
    slots: LineupSlots,
) -> Result<bool> {
    let manager = find_manager(db, manager)?;
    let errors = validate_submission(db, manager.id, week, &slots)?;

    if errors.is_empty() {
        println!("✓ Lineup is valid for week {}", week);
        return Ok(true);
    }
    println!("✗ Lineup is not valid for week {}:", week);
    for error in &errors {
        println!("  {}", error);
    }
    Ok(false)
}

#[derive(Debug, Serialize)]
struct SlotRow {
    slot: String,
    player: String,
    team: String,
    points: Option<f64>,
}

#[derive(Debug, Serialize)]
struct LineupView {
    manager: String,
    week: WeekNumber,
    slots: Vec<SlotRow>,
    total: f64,
}

/// Handle `lineup show`
pub fn handle_lineup_show(
    db: &LeagueDatabase,
    week: WeekNumber,
    manager: Option<&str>,
    as_json: bool,
) -> Result<()> {
    let lineups = match manager {
        Some(name) => {
            let manager = find_manager(db, name)?;
            db.get_lineup(manager.id, week)?.into_iter().collect()
        }
        None => db.get_lineups_for_week(week)?,
    };
    let managers = db.get_all_managers()?;
    let scores = db.get_scores_for_week(week)?;

    let mut views = Vec::with_capacity(lineups.len());
    for lineup in &lineups {
        let mut slots = Vec::with_capacity(Slot::ALL.len());
        for (slot, player_id) in lineup.slots.iter() {
            let player = db.get_player(player_id)?;
            let team = match &player {
                Some(p) => db.get_team(p.team_id)?.map(|t| t.short_code),
                None => None,
            };
            slots.push(SlotRow {
                slot: slot.to_string(),
                player: player.map_or_else(|| format!("#{}", player_id), |p| p.name),
                team: team.unwrap_or_default(),
                points: scores.get(&player_id).copied(),
            });
        }
        let manager = managers
            .iter()
            .find(|m| m.id == lineup.manager_id)
            .map_or_else(|| lineup.manager_id.to_string(), |m| m.name.clone());

        views.push(LineupView {
            manager,
            week,
            slots,
            total: week_score(lineup, &scores),
        });
    }

    if as_json {
        return print_json(&views);
    }
    if views.is_empty() {
        println!("No lineups for week {}", week);
        return Ok(());
    }

    for view in views {
        println!("{} (week {}): {:.2} pts", view.manager, view.week, view.total);
        for row in view.slots {
            let points = row
                .points
                .map_or_else(|| "-".to_string(), |p| format!("{:.2}", p));
            println!("  {:<5} {:<28} {:<4} {:>7}", row.slot, row.player, row.team, points);
        }
    }
    Ok(())
}

/// Handle `lineup remove`
pub fn handle_lineup_remove(
    db: &mut LeagueDatabase,
    manager: &str,
    week: WeekNumber,
    now: DateTime<Utc>,
) -> Result<()> {
    let manager = find_manager(db, manager)?;
    remove_lineup(db, manager.id, week, now)?;
    println!("✓ Lineup removed for {} (week {})", manager.name, week);
    Ok(())
}
