//! Scoring engine properties through the public API

use playoff_ffl::scoring::{
    calculate_score,
    compute::{distance_bonus, yardage_points},
    RawPlayerStats,
};
use serde_json::json;

fn raw(value: serde_json::Value) -> RawPlayerStats {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_passing_yardage_uses_highest_tier_reached() {
    assert_eq!(calculate_score(&raw(json!({ "pass_yd": 325 }))), 15.0);
    assert_eq!(calculate_score(&raw(json!({ "pass_yd": 400 }))), 20.0);
    assert_eq!(yardage_points(299.0, 25.0, &[(400.0, 4.0), (300.0, 2.0)]), 11.0);
}

#[test]
fn test_distance_bonus() {
    assert_eq!(distance_bonus(3.0, 1.0), 4.0);
    assert_eq!(
        calculate_score(&raw(json!({ "rush_td_40p": 3, "rush_td_50p": 1 }))),
        4.0
    );
}

#[test]
fn test_reception_only() {
    assert_eq!(calculate_score(&raw(json!({ "rec": 7 }))), 3.5);
}

#[test]
fn test_both_naming_conventions_score_the_same() {
    let compact = raw(json!({ "rush_yd": 112, "rush_td": 1, "rec": 3, "rec_yd": 20, "fum_lost": 1 }));
    let verbose = raw(json!({
        "rushingYards": 112,
        "rushingTouchdowns": 1,
        "receivingReceptions": 3,
        "receivingYards": 20,
        "fumblesLost": 1
    }));
    assert_eq!(calculate_score(&compact), calculate_score(&verbose));
    assert_eq!(calculate_score(&compact), 20.5);
}

#[test]
fn test_scoring_is_idempotent_and_two_decimal() {
    let stats = raw(json!({ "pass_sack": 3, "rec": 1, "rec_yd": 9 }));
    let first = calculate_score(&stats);
    assert_eq!(first, calculate_score(&stats));
    assert_eq!(first, -1.0);
    assert_eq!((first * 100.0).round() / 100.0, first);
}

#[test]
fn test_malformed_input_never_fails() {
    let stats = raw(json!({ "pass_yd": "lots", "rec": null, "unknown_key": 99 }));
    assert_eq!(calculate_score(&stats), 0.0);
    assert_eq!(calculate_score(&RawPlayerStats::new()), 0.0);
}
