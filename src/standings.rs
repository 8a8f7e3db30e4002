//! Leaderboard: lineup totals per week and across the playoffs.

use crate::{
    lineup::Lineup, models::Manager, scoring::compute::round_points, ManagerId, PlayerId,
    WeekNumber,
};
use serde::Serialize;
use std::{cmp::Ordering, collections::BTreeMap};

/// Player points for one week, keyed by player.
pub type WeekScores = BTreeMap<PlayerId, f64>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub manager_id: ManagerId,
    pub name: String,
    pub weekly: BTreeMap<WeekNumber, f64>,
    pub total: f64,
}

/// Sum of the lineup's five players; players without a score count as zero.
pub fn week_score(lineup: &Lineup, scores: &WeekScores) -> f64 {
    let total = lineup
        .slots
        .player_ids()
        .iter()
        .map(|id| scores.get(id).copied().unwrap_or(0.0))
        .sum();
    round_points(total)
}

/// One row per manager with a score for every playoff week (zero where no
/// lineup was submitted), ordered by total descending, then by name.
pub fn season_standings(
    managers: &[Manager],
    lineups: &[Lineup],
    scores: &BTreeMap<WeekNumber, WeekScores>,
) -> Vec<Standing> {
    let empty = WeekScores::new();
    let by_key: BTreeMap<(ManagerId, WeekNumber), &Lineup> = lineups
        .iter()
        .map(|l| ((l.manager_id, l.week), l))
        .collect();

    let mut standings: Vec<Standing> = managers
        .iter()
        .map(|manager| {
            let weekly: BTreeMap<WeekNumber, f64> = WeekNumber::PLAYOFF_WEEKS
                .iter()
                .map(|week| {
                    let points = by_key.get(&(manager.id, *week)).map_or(0.0, |lineup| {
                        week_score(lineup, scores.get(week).unwrap_or(&empty))
                    });
                    (*week, points)
                })
                .collect();
            let total = round_points(weekly.values().sum());

            Standing {
                manager_id: manager.id,
                name: manager.name.clone(),
                weekly,
                total,
            }
        })
        .collect();

    standings.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    standings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::LineupSlots;

    fn lineup(manager: i64, week: u8, first_player: i64) -> Lineup {
        let id = |offset: i64| PlayerId::new(first_player + offset);
        Lineup {
            manager_id: ManagerId::new(manager),
            week: WeekNumber::new(week),
            slots: LineupSlots {
                qb: id(0),
                rb: id(1),
                wr: id(2),
                te: id(3),
                flex: id(4),
            },
        }
    }

    fn manager(id: i64, name: &str) -> Manager {
        Manager {
            id: ManagerId::new(id),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_week_score_treats_missing_as_zero() {
        let scores: WeekScores = [(PlayerId::new(1), 10.25), (PlayerId::new(3), 4.1)]
            .into_iter()
            .collect();
        assert_eq!(week_score(&lineup(1, 1, 1), &scores), 14.35);
    }

    #[test]
    fn test_standings_sorted_by_total_then_name() {
        let managers = vec![manager(1, "Carol"), manager(2, "alice"), manager(3, "Bob")];
        let lineups = vec![lineup(1, 1, 1), lineup(2, 1, 1), lineup(3, 1, 10), lineup(3, 2, 10)];

        let mut scores = BTreeMap::new();
        scores.insert(
            WeekNumber::new(1),
            (1..=14).map(|i| (PlayerId::new(i), 1.0)).collect(),
        );
        scores.insert(
            WeekNumber::new(2),
            (10..=14).map(|i| (PlayerId::new(i), 2.0)).collect(),
        );

        let standings = season_standings(&managers, &lineups, &scores);
        let order: Vec<_> = standings.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(order, vec!["Bob", "Carol", "alice"]);

        assert_eq!(standings[0].total, 15.0);
        assert_eq!(standings[0].weekly[&WeekNumber::new(2)], 10.0);
        assert_eq!(standings[1].weekly.len(), 4);
        assert_eq!(standings[1].weekly[&WeekNumber::new(3)], 0.0);
    }

    #[test]
    fn test_manager_without_lineups_scores_zero() {
        let standings = season_standings(&[manager(1, "Dana")], &[], &BTreeMap::new());
        assert_eq!(standings[0].total, 0.0);
    }
}
