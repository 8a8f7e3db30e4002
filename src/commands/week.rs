//! Week administration: seeding, locks and deadlines

use super::print_json;
use crate::{
    error::FflError,
    storage::LeagueDatabase,
    week::{current_week, WeekState},
    Result, WeekNumber,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct WeekRow {
    number: WeekNumber,
    label: String,
    deadline: Option<DateTime<Utc>>,
    manually_locked: bool,
    state: WeekState,
    current: bool,
}

/// Handle `week list`
pub fn handle_week_list(db: &LeagueDatabase, now: DateTime<Utc>, as_json: bool) -> Result<()> {
    let weeks = db.get_all_weeks()?;
    if weeks.is_empty() {
        println!("No weeks yet. Run `playoff-ffl week seed` first.");
        return Ok(());
    }

    let current = current_week(&weeks, now).map(|w| w.number);
    let rows: Vec<WeekRow> = weeks
        .iter()
        .map(|w| WeekRow {
            number: w.number,
            label: w.label.clone(),
            deadline: w.deadline,
            manually_locked: w.is_locked,
            state: w.state_at(now),
            current: current == Some(w.number),
        })
        .collect();

    if as_json {
        return print_json(&rows);
    }

    for row in rows {
        let deadline = row
            .deadline
            .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "no deadline".to_string());
        let state = match row.state {
            WeekState::Open => "open",
            WeekState::Locked => "LOCKED",
        };
        println!(
            "{} Week {} {:<24} {:<22} {}",
            if row.current { "*" } else { " " },
            row.number,
            row.label,
            deadline,
            state
        );
    }
    Ok(())
}

/// Handle `week seed`
pub fn handle_week_seed(db: &mut LeagueDatabase) -> Result<()> {
    let created = db.seed_weeks()?;
    println!("✓ {} week(s) created", created);
    Ok(())
}

/// Handle `week lock` / `week unlock`
pub fn handle_week_set_locked(
    db: &mut LeagueDatabase,
    week: WeekNumber,
    locked: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    if !db.set_week_locked(week, locked)? {
        return Err(FflError::not_found("Week", week));
    }
    tracing::info!(week = %week, locked, "week lock flag changed");

    if locked {
        println!("✓ Week {} locked", week);
    } else {
        let still_locked = db
            .get_week(week)?
            .is_some_and(|w| w.is_locked_at(now));
        if still_locked {
            println!("✓ Week {} manual lock cleared (still locked: deadline has passed)", week);
        } else {
            println!("✓ Week {} unlocked", week);
        }
    }
    Ok(())
}

/// Handle `week deadline`
pub fn handle_week_deadline(
    db: &mut LeagueDatabase,
    week: WeekNumber,
    deadline: Option<DateTime<Utc>>,
) -> Result<()> {
    if !db.set_week_deadline(week, deadline)? {
        return Err(FflError::not_found("Week", week));
    }
    match deadline {
        Some(d) => println!("✓ Week {} deadline set to {}", week, d.to_rfc3339()),
        None => println!("✓ Week {} deadline cleared", week),
    }
    Ok(())
}
