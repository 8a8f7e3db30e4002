//! Unit tests for scoring computation logic

use super::*;
use serde_json::json;

fn raw(value: serde_json::Value) -> RawPlayerStats {
    serde_json::from_value(value).unwrap()
}

#[cfg(test)]
mod yardage_tests {
    use super::*;

    #[test]
    fn test_passing_yards_300_tier() {
        // floor(325 / 25) = 13, plus the 300+ bonus
        let stats = RawPlayerStats::new().with("pass_yd", 325.0);
        assert_eq!(calculate_score(&stats), 15.0);
    }

    #[test]
    fn test_passing_yards_400_tier_replaces_300_tier() {
        // floor(410 / 25) = 16, plus only the 400+ bonus
        let stats = RawPlayerStats::new().with("pass_yd", 410.0);
        assert_eq!(calculate_score(&stats), 20.0);
    }

    #[test]
    fn test_passing_yards_below_threshold() {
        let stats = RawPlayerStats::new().with("pass_yd", 299.0);
        assert_eq!(calculate_score(&stats), 11.0);
    }

    #[test]
    fn test_rushing_and_receiving_tiers() {
        assert_eq!(
            calculate_score(&RawPlayerStats::new().with("rush_yd", 99.0)),
            9.0
        );
        assert_eq!(
            calculate_score(&RawPlayerStats::new().with("rush_yd", 100.0)),
            11.0
        );
        assert_eq!(
            calculate_score(&RawPlayerStats::new().with("rec_yd", 205.0)),
            22.0
        );
    }

    #[test]
    fn test_yardage_points_helper() {
        assert_eq!(yardage_points(0.0, 10.0, &RUSH_YARDAGE_TIERS), 0.0);
        assert_eq!(yardage_points(-3.0, 10.0, &RUSH_YARDAGE_TIERS), -1.0);
        assert_eq!(yardage_points(199.0, 10.0, &RUSH_YARDAGE_TIERS), 20.0);
        assert_eq!(yardage_points(400.0, 25.0, &PASS_YARDAGE_TIERS), 20.0);
    }
}

#[cfg(test)]
mod distance_bonus_tests {
    use super::*;

    #[test]
    fn test_forty_and_fifty_plus_touchdowns() {
        // 1 x 2 for the 50+ TD, (3 - 1) x 1 for the 40-49 band
        assert_eq!(distance_bonus(3.0, 1.0), 4.0);

        let stats = RawPlayerStats::new()
            .with("pass_td_40p", 3.0)
            .with("pass_td_50p", 1.0);
        assert_eq!(calculate_score(&stats), 4.0);
    }

    #[test]
    fn test_fifty_plus_without_forty_count() {
        let stats = RawPlayerStats::new().with("rush_td_50p", 1.0);
        assert_eq!(calculate_score(&stats), 2.0);
    }

    #[test]
    fn test_malformed_band_is_clamped() {
        // 40+ count below the 50+ count must not subtract points
        assert_eq!(distance_bonus(1.0, 2.0), 4.0);
    }

    #[test]
    fn test_bands_are_independent_per_category() {
        let stats = RawPlayerStats::new()
            .with("pass_td_40p", 1.0)
            .with("rush_td_50p", 1.0)
            .with("rec_td_40p", 2.0)
            .with("rec_td_50p", 2.0);
        assert_eq!(calculate_score(&stats), 1.0 + 2.0 + 4.0);
    }
}

#[cfg(test)]
mod schedule_tests {
    use super::*;

    #[test]
    fn test_reception_only() {
        let stats = RawPlayerStats::new().with("rec", 7.0);
        assert_eq!(calculate_score(&stats), 3.5);
    }

    #[test]
    fn test_quarterback_stat_line() {
        let stats = raw(json!({
            "pass_yd": 287,
            "pass_td": 2,
            "pass_int": 1,
            "pass_sack": 3,
            "rush_yd": 24,
            "fum": 1,
            "fum_lost": 1,
        }));
        // 11 + 8 - 2 - 1.5 + 2 - 1 - 1
        assert_eq!(calculate_score(&stats), 15.5);
    }

    #[test]
    fn test_receiver_stat_line_verbose_format() {
        let stats = raw(json!({
            "receivingReceptions": 9,
            "receivingYards": 131,
            "receivingTouchdowns": 1,
            "rushingYards": 12,
        }));
        // 4.5 + 13 + 1 + 6 + 1
        assert_eq!(calculate_score(&stats), 25.5);
    }

    #[test]
    fn test_two_point_conversions_and_return_td() {
        let stats = raw(json!({
            "pass_2pt": 1,
            "rush_2pt": 1,
            "rec_2pt": 1,
            "fum_rec_td": 1,
        }));
        assert_eq!(calculate_score(&stats), 12.0);
    }

    #[test]
    fn test_empty_stats_score_zero() {
        assert_eq!(calculate_score(&RawPlayerStats::new()), 0.0);
    }

    #[test]
    fn test_malformed_values_score_zero() {
        let stats = raw(json!({ "pass_yd": "lots", "rec": true }));
        assert_eq!(calculate_score(&stats), 0.0);
    }
}

#[cfg(test)]
mod rounding_tests {
    use super::*;

    #[test]
    fn test_calculate_score_is_idempotent() {
        let stats = raw(json!({
            "pass_yd": 333,
            "pass_sack": 3,
            "rec": 1,
            "rush_td_40p": 1,
        }));
        let first = calculate_score(&stats);
        let second = calculate_score(&stats);
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_has_at_most_two_decimals() {
        let stats = raw(json!({ "rec": 3, "pass_sack": 1 }));
        let score = calculate_score(&stats);
        assert_eq!(score, 1.0);
        assert_eq!((score * 100.0).round() / 100.0, score);
    }

    #[test]
    fn test_round_points() {
        assert_eq!(round_points(12.345_6), 12.35);
        assert_eq!(round_points(-1.004), -1.0);
        assert_eq!(round_points(7.0), 7.0);
    }
}
