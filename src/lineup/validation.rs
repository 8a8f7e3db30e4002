//! Lineup legality rules.
//!
//! Rules run in families: position eligibility, then slot distinctness,
//! then the burn rule together with the team-distribution constraint.
//! A family that reports errors stops the later ones, since they assume
//! every slot holds a real, eligible, unique player.

use super::{Lineup, LineupField, LineupSlots, LineupStore, ValidationError};
use crate::{
    models::{Player, Team},
    ManagerId, PlayerId, Result, Slot, TeamId, WeekNumber,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;


/// Everything the rules need, fetched ahead of time.
#[derive(Debug, Clone, Default)]
pub struct LineupContext {
    /// Players referenced by the submitted slots; missing entries fail closed.
    pub players: HashMap<PlayerId, Player>,
    pub teams: HashMap<TeamId, Team>,
    /// Players the manager used in earlier weeks.
    pub used_players: HashSet<PlayerId>,
}

impl LineupContext {
    pub fn new(
        players: impl IntoIterator<Item = Player>,
        teams: impl IntoIterator<Item = Team>,
        previous_lineups: &[Lineup],
        week: WeekNumber,
    ) -> Self {
        Self {
            players: players.into_iter().map(|p| (p.id, p)).collect(),
            teams: teams.into_iter().map(|t| (t.id, t)).collect(),
            used_players: burned_players(previous_lineups, week),
        }
    }
}

/// Validate a lineup for `week` against pre-fetched data. Empty means legal.
pub fn validate_lineup(
    week: WeekNumber,
    slots: &LineupSlots,
    ctx: &LineupContext,
) -> Vec<ValidationError> {
    let errors = check_positions(slots, &ctx.players);
    if !errors.is_empty() {
        return errors;
    }

    let errors = check_distinct_players(slots, &ctx.players);
    if !errors.is_empty() {
        return errors;
    }

    let mut errors = check_burn_rule(slots, &ctx.used_players, &ctx.players, &ctx.teams);
    errors.extend(check_team_distribution(week, slots, &ctx.players));
    errors
}

/// Fetch the context for a submission through `store`, then validate it.
pub fn validate_submission<S: LineupStore + ?Sized>(
    store: &S,
    manager_id: ManagerId,
    week: WeekNumber,
    slots: &LineupSlots,
) -> Result<Vec<ValidationError>> {
    let ctx = load_context(store, manager_id, week, slots)?;
    let errors = validate_lineup(week, slots, &ctx);
    debug!(
        manager = %manager_id,
        week = %week,
        errors = errors.len(),
        "validated lineup"
    );
    Ok(errors)
}

/// Gather slot players, their teams and the manager's earlier lineups.
pub fn load_context<S: LineupStore + ?Sized>(
    store: &S,
    manager_id: ManagerId,
    week: WeekNumber,
    slots: &LineupSlots,
) -> Result<LineupContext> {
    let mut players = HashMap::new();
    for player_id in slots.player_ids() {
        if players.contains_key(&player_id) {
            continue;
        }
        if let Some(player) = store.find_player(player_id)? {
            players.insert(player_id, player);
        }
    }

    let mut teams = HashMap::new();
    for player in players.values() {
        if teams.contains_key(&player.team_id) {
            continue;
        }
        if let Some(team) = store.find_team(player.team_id)? {
            teams.insert(team.id, team);
        }
    }

    let previous = store.find_lineups_for_manager_before_week(manager_id, week)?;

    Ok(LineupContext {
        players,
        teams,
        used_players: burned_players(&previous, week),
    })
}

/// Each slot must hold an existing player of an eligible position.
pub fn check_positions(
    slots: &LineupSlots,
    players: &HashMap<PlayerId, Player>,
) -> Vec<ValidationError> {
    slots
        .iter()
        .filter(|(slot, player_id)| {
            !players
                .get(player_id)
                .is_some_and(|player| slot.accepts(player.position))
        })
        .map(|(slot, _)| {
            ValidationError::new(
                LineupField::Slot(slot),
                format!("{} slot must have {}.", slot, slot.requirement()),
            )
        })
        .collect()
}

/// A player may fill only one slot; repeats are reported on the later slot.
pub fn check_distinct_players(
    slots: &LineupSlots,
    players: &HashMap<PlayerId, Player>,
) -> Vec<ValidationError> {
    let mut first_slot: HashMap<PlayerId, Slot> = HashMap::new();
    let mut errors = Vec::new();

    for (slot, player_id) in slots.iter() {
        match first_slot.get(&player_id) {
            Some(first) => {
                let name = player_name(players, player_id);
                errors.push(ValidationError::new(
                    LineupField::Slot(slot),
                    format!(
                        "{} is already in the {} slot - a player can only fill one slot.",
                        name, first
                    ),
                ));
            }
            None => {
                first_slot.insert(player_id, slot);
            }
        }
    }

    errors
}

/// Every player from the manager's lineups in weeks before `week`.
pub fn burned_players(previous_lineups: &[Lineup], week: WeekNumber) -> HashSet<PlayerId> {
    previous_lineups
        .iter()
        .filter(|lineup| lineup.week < week)
        .flat_map(|lineup| lineup.slots.player_ids())
        .collect()
}

/// No slot may reuse a player from an earlier week.
pub fn check_burn_rule(
    slots: &LineupSlots,
    used_players: &HashSet<PlayerId>,
    players: &HashMap<PlayerId, Player>,
    teams: &HashMap<TeamId, Team>,
) -> Vec<ValidationError> {
    slots
        .iter()
        .filter(|(_, player_id)| used_players.contains(player_id))
        .map(|(slot, player_id)| {
            let player = players.get(&player_id);
            let name = player_name(players, player_id);
            let code = player
                .and_then(|p| teams.get(&p.team_id))
                .map_or("?", |t| t.short_code.as_str());
            ValidationError::new(
                LineupField::Slot(slot),
                format!(
                    "You already used {} ({}) in a previous week - cannot use them again.",
                    name, code
                ),
            )
        })
        .collect()
}

/// How many lineup players come from each team, largest first.
pub fn team_counts(slots: &LineupSlots, players: &HashMap<PlayerId, Player>) -> Vec<usize> {
    let mut by_team: HashMap<TeamId, usize> = HashMap::new();
    for player_id in slots.player_ids() {
        if let Some(player) = players.get(&player_id) {
            *by_team.entry(player.team_id).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<usize> = by_team.into_values().collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    counts
}

/// Per-week team-distribution requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamRule {
    /// At least five teams, at most one player from any of them.
    OnePerTeam,
    /// Exactly `counts.len()` teams with these per-team counts, largest first.
    Split { counts: &'static [usize] },
}

impl TeamRule {
    pub fn for_week(week: WeekNumber) -> Option<Self> {
        match week.as_u8() {
            1 | 2 => Some(TeamRule::OnePerTeam),
            3 => Some(TeamRule::Split { counts: &[2, 1, 1, 1] }),
            4 => Some(TeamRule::Split { counts: &[3, 2] }),
            _ => None,
        }
    }
}

/// Enforce the week's required team shape.
pub fn check_team_distribution(
    week: WeekNumber,
    slots: &LineupSlots,
    players: &HashMap<PlayerId, Player>,
) -> Vec<ValidationError> {
    let counts = team_counts(slots, players);
    let round = week.label().unwrap_or("this");

    let message = match TeamRule::for_week(week) {
        Some(TeamRule::OnePerTeam) => {
            if counts.len() < 5 || counts.first().is_some_and(|c| *c > 1) {
                Some(format!(
                    "For {} round, you must select players from 5 different teams (max 1 player per team).",
                    round
                ))
            } else {
                None
            }
        }
        Some(TeamRule::Split { counts: required }) => {
            if counts.len() != required.len() {
                Some(format!(
                    "{} lineup must include players from exactly {} different teams.",
                    round,
                    required.len()
                ))
            } else if counts != required {
                Some(format!(
                    "{} lineup must be {} ({}).",
                    round,
                    split_label(required),
                    split_description(required)
                ))
            } else {
                None
            }
        }
        None => Some("Invalid week number.".to_string()),
    };

    message
        .map(|m| vec![ValidationError::new(LineupField::Lineup, m)])
        .unwrap_or_default()
}

fn split_label(counts: &[usize]) -> String {
    counts
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

fn split_description(counts: &[usize]) -> String {
    match counts {
        [3, 2] => "a 3-2 split between the two teams".to_string(),
        [2, 1, 1, 1] => {
            "one team with 2 players, three teams with 1 player each".to_string()
        }
        _ => format!("{} players from {} teams", counts.iter().sum::<usize>(), counts.len()),
    }
}

fn player_name(players: &HashMap<PlayerId, Player>, player_id: PlayerId) -> String {
    players
        .get(&player_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("Player {}", player_id))
}
