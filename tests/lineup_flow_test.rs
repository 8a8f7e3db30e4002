//! End-to-end lineup workflow against a database file

use chrono::{DateTime, Duration, Utc};
use playoff_ffl::{
    lineup::{submit_lineup, Lineup, LineupField, LineupSlots, ValidationError},
    standings::season_standings,
    storage::*,
    FflError, ManagerId, PlayerId, Position, Slot, WeekNumber,
};
use std::collections::BTreeMap;

fn now() -> DateTime<Utc> {
    "2026-01-10T12:00:00Z".parse().unwrap()
}

struct League {
    db: LeagueDatabase,
    _dir: tempfile::TempDir,
    /// players[team][n]: n = 0 QB, 1 RB, 2 WR, 3 TE, 4 WR
    players: Vec<Vec<PlayerId>>,
    alice: ManagerId,
    bob: ManagerId,
}

fn league() -> League {
    let dir = tempfile::tempdir().unwrap();
    let mut db = LeagueDatabase::open(&dir.path().join("league.db")).unwrap();
    db.seed_weeks().unwrap();

    let mut players = Vec::new();
    for code in ["BUF", "KC", "PHI", "DET", "BAL", "HOU"] {
        let team_id = db.upsert_team(&format!("{} Team", code), code).unwrap();
        let mut roster = Vec::new();
        for (n, position) in [
            Position::QB,
            Position::RB,
            Position::WR,
            Position::TE,
            Position::WR,
        ]
        .into_iter()
        .enumerate()
        {
            roster.push(
                db.insert_player(&NewPlayer {
                    name: format!("{} {}{}", code, position, n),
                    position,
                    team_id,
                    external_id: None,
                })
                .unwrap(),
            );
        }
        players.push(roster);
    }

    let alice = db.insert_manager("Alice").unwrap();
    let bob = db.insert_manager("Bob").unwrap();
    League {
        db,
        _dir: dir,
        players,
        alice,
        bob,
    }
}

impl League {
    /// Lineup from (team, n) picks in QB, RB, WR, TE, FLEX order
    fn lineup(&self, manager_id: ManagerId, week: u8, picks: [(usize, usize); 5]) -> Lineup {
        let p = |(team, n): (usize, usize)| self.players[team][n];
        Lineup {
            manager_id,
            week: WeekNumber::new(week),
            slots: LineupSlots {
                qb: p(picks[0]),
                rb: p(picks[1]),
                wr: p(picks[2]),
                te: p(picks[3]),
                flex: p(picks[4]),
            },
        }
    }
}

fn rejected(err: FflError) -> Vec<ValidationError> {
    match err {
        FflError::InvalidLineup(errors) => errors,
        other => panic!("Expected InvalidLineup, got {:?}", other),
    }
}

#[test]
fn test_wild_card_requires_five_distinct_teams() {
    let mut league = league();
    let four_teams = league.lineup(league.alice, 1, [(0, 0), (1, 1), (2, 2), (3, 3), (0, 4)]);

    let errors = rejected(submit_lineup(&mut league.db, &four_teams, now()).unwrap_err());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, LineupField::Lineup);
    assert!(errors[0].message.contains("5 different teams"));
}

#[test]
fn test_burn_rule_across_weeks_but_not_within_week() {
    let mut league = league();
    let week1 = league.lineup(league.alice, 1, [(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
    submit_lineup(&mut league.db, &week1, now()).unwrap();

    // Resubmitting week 1 is an update, not a reuse
    submit_lineup(&mut league.db, &week1, now()).unwrap();

    let week2 = league.lineup(league.alice, 2, [(0, 0), (5, 1), (3, 2), (2, 3), (1, 4)]);
    let errors = rejected(submit_lineup(&mut league.db, &week2, now()).unwrap_err());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, LineupField::Slot(Slot::Qb));
    assert!(errors[0].message.contains("BUF QB0 (BUF)"));

    // Bob never used that QB
    let bob_week2 = league.lineup(league.bob, 2, [(0, 0), (5, 1), (3, 2), (2, 3), (1, 4)]);
    submit_lineup(&mut league.db, &bob_week2, now()).unwrap();
}

#[test]
fn test_conference_round_shape() {
    let mut league = league();
    let two_two_one = league.lineup(league.alice, 3, [(0, 0), (0, 1), (1, 2), (1, 3), (2, 4)]);
    let errors = rejected(submit_lineup(&mut league.db, &two_two_one, now()).unwrap_err());
    assert!(errors[0].message.contains("exactly 4 different teams"));

    let two_one_one_one = league.lineup(league.alice, 3, [(0, 0), (0, 1), (1, 2), (2, 3), (3, 4)]);
    submit_lineup(&mut league.db, &two_one_one_one, now()).unwrap();
}

#[test]
fn test_deadline_locks_until_cleared() {
    let mut league = league();
    let week = WeekNumber::new(1);
    league
        .db
        .set_week_deadline(week, Some(now() - Duration::hours(1)))
        .unwrap();

    let lineup = league.lineup(league.alice, 1, [(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
    assert!(matches!(
        submit_lineup(&mut league.db, &lineup, now()),
        Err(FflError::WeekLocked { week: 1 })
    ));

    // Clearing a manual flag does not reopen a passed deadline
    league.db.set_week_locked(week, false).unwrap();
    assert!(submit_lineup(&mut league.db, &lineup, now()).is_err());

    league.db.set_week_deadline(week, None).unwrap();
    submit_lineup(&mut league.db, &lineup, now()).unwrap();
}

#[test]
fn test_scores_flow_into_standings() {
    let mut league = league();
    let a1 = league.lineup(league.alice, 1, [(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
    let b1 = league.lineup(league.bob, 1, [(5, 0), (4, 1), (3, 2), (2, 3), (1, 4)]);
    submit_lineup(&mut league.db, &a1, now()).unwrap();
    submit_lineup(&mut league.db, &b1, now()).unwrap();

    let week = WeekNumber::new(1);
    for id in a1.slots.player_ids() {
        league.db.upsert_player_score(week, id, 10.0).unwrap();
    }
    league
        .db
        .upsert_player_score(week, b1.slots.qb, 30.5)
        .unwrap();

    let managers = league.db.get_all_managers().unwrap();
    let lineups = league.db.get_all_lineups().unwrap();
    let mut scores = BTreeMap::new();
    scores.insert(week, league.db.get_scores_for_week(week).unwrap());

    let standings = season_standings(&managers, &lineups, &scores);
    assert_eq!(standings[0].name, "Alice");
    assert_eq!(standings[0].total, 50.0);
    assert_eq!(standings[1].total, 30.5);
}
