//! Lock-aware lineup writes.
//!
//! The rules in `validation` ignore locks; these workflows refuse any write
//! against a locked week before validation runs.

use super::{validate_submission, Lineup, LineupStore};
use crate::{error::FflError, week::Week, ManagerId, Result, WeekNumber};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

fn open_week<S: LineupStore + ?Sized>(
    store: &S,
    number: WeekNumber,
    now: DateTime<Utc>,
) -> Result<Week> {
    let week = store
        .find_week(number)?
        .ok_or_else(|| FflError::not_found("Week", number))?;

    if week.is_locked_at(now) {
        warn!(week = %number, "rejected lineup change for locked week");
        return Err(FflError::WeekLocked {
            week: number.as_u8(),
        });
    }

    Ok(week)
}

/// Validate and upsert a lineup, replacing the manager's existing one for the week.
pub fn submit_lineup<S: LineupStore + ?Sized>(
    store: &mut S,
    lineup: &Lineup,
    now: DateTime<Utc>,
) -> Result<()> {
    open_week(store, lineup.week, now)?;

    let errors = validate_submission(store, lineup.manager_id, lineup.week, &lineup.slots)?;
    if !errors.is_empty() {
        return Err(FflError::InvalidLineup(errors));
    }

    store.upsert_lineup(lineup)?;
    info!(
        manager = %lineup.manager_id,
        week = %lineup.week,
        "lineup saved"
    );
    Ok(())
}

/// Delete a manager's lineup for an unlocked week.
pub fn remove_lineup<S: LineupStore + ?Sized>(
    store: &mut S,
    manager_id: ManagerId,
    week: WeekNumber,
    now: DateTime<Utc>,
) -> Result<()> {
    open_week(store, week, now)?;

    if !store.delete_lineup(manager_id, week)? {
        return Err(FflError::not_found(
            "Lineup",
            format!("manager {} week {}", manager_id, week),
        ));
    }
    info!(manager = %manager_id, week = %week, "lineup removed");
    Ok(())
}
