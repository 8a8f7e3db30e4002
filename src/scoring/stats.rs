//! Raw stat bags and their normalization into one canonical stat line.
//!
//! Providers report the same counters under two naming conventions: a
//! compact one (`pass_yd`, `rec`) and a verbose one (`passingYards`,
//! `receivingReceptions`). `StatLine::from_raw` resolves every concept once,
//! preferring the compact key, so scoring never looks at raw keys.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// An unvalidated bag of named stat counters, exactly as a provider sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPlayerStats(BTreeMap<String, Value>);

impl RawPlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a numeric counter.
    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.insert(key, Value::from(value));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Numeric value for `key`; missing, non-numeric and non-finite values are `None`.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0
            .get(key)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Map<String, Value>> for RawPlayerStats {
    fn from(map: Map<String, Value>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for RawPlayerStats {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Yards lost per sack used to estimate sacks from sack yardage.
const YARDS_PER_SACK: f64 = 5.5;

/// Canonical per-player counters used by the scoring engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatLine {
    pub pass_yd: f64,
    pub pass_td: f64,
    pub pass_int: f64,
    pub pass_sack: f64,
    pub pass_td_40p: f64,
    pub pass_td_50p: f64,
    pub pass_2pt: f64,

    pub rush_yd: f64,
    pub rush_td: f64,
    pub rush_td_40p: f64,
    pub rush_td_50p: f64,
    pub rush_2pt: f64,

    pub rec: f64,
    pub rec_yd: f64,
    pub rec_td: f64,
    pub rec_td_40p: f64,
    pub rec_td_50p: f64,
    pub rec_2pt: f64,

    pub fum: f64,
    pub fum_lost: f64,
    pub fum_rec_td: f64,
}

impl StatLine {
    /// Resolve each concept: compact key (explicit zero included), else verbose key, else zero.
    pub fn from_raw(raw: &RawPlayerStats) -> Self {
        let pick = |compact: &str, verbose: &str| {
            raw.number(compact)
                .or_else(|| raw.number(verbose))
                .unwrap_or(0.0)
        };
        let only = |compact: &str| raw.number(compact).unwrap_or(0.0);

        let pass_sack = raw
            .number("pass_sack")
            .or_else(|| raw.number("sacks"))
            .or_else(|| {
                raw.number("pass_sack_yds")
                    .filter(|yds| *yds != 0.0)
                    .map(|yds| (yds / YARDS_PER_SACK).round())
            })
            .unwrap_or(0.0);

        Self {
            pass_yd: pick("pass_yd", "passingYards"),
            pass_td: pick("pass_td", "passingTouchdowns"),
            pass_int: pick("pass_int", "interceptions"),
            pass_sack,
            pass_td_40p: only("pass_td_40p"),
            pass_td_50p: only("pass_td_50p"),
            pass_2pt: only("pass_2pt"),

            rush_yd: pick("rush_yd", "rushingYards"),
            rush_td: pick("rush_td", "rushingTouchdowns"),
            rush_td_40p: only("rush_td_40p"),
            rush_td_50p: only("rush_td_50p"),
            rush_2pt: only("rush_2pt"),

            rec: pick("rec", "receivingReceptions"),
            rec_yd: pick("rec_yd", "receivingYards"),
            rec_td: pick("rec_td", "receivingTouchdowns"),
            rec_td_40p: only("rec_td_40p"),
            rec_td_50p: only("rec_td_50p"),
            rec_2pt: only("rec_2pt"),

            fum: only("fum"),
            fum_lost: pick("fum_lost", "fumblesLost"),
            fum_rec_td: pick("fum_rec_td", "defensiveTouchdowns"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawPlayerStats {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_compact_keys_win_over_verbose() {
        let line = StatLine::from_raw(&raw(json!({
            "pass_yd": 250,
            "passingYards": 310,
        })));
        assert_eq!(line.pass_yd, 250.0);
    }

    #[test]
    fn test_explicit_zero_compact_value_is_kept() {
        let line = StatLine::from_raw(&raw(json!({
            "rec": 0,
            "receivingReceptions": 9,
        })));
        assert_eq!(line.rec, 0.0);
    }

    #[test]
    fn test_verbose_keys_used_when_compact_absent() {
        let line = StatLine::from_raw(&raw(json!({
            "rushingYards": 88,
            "rushingTouchdowns": 1,
            "fumblesLost": 1,
            "defensiveTouchdowns": 1,
        })));
        assert_eq!(line.rush_yd, 88.0);
        assert_eq!(line.rush_td, 1.0);
        assert_eq!(line.fum_lost, 1.0);
        assert_eq!(line.fum_rec_td, 1.0);
    }

    #[test]
    fn test_non_numeric_values_are_absent() {
        let line = StatLine::from_raw(&raw(json!({
            "pass_td": "three",
            "passingTouchdowns": 2,
            "rec_yd": null,
            "rush_yd": [10],
        })));
        assert_eq!(line.pass_td, 2.0);
        assert_eq!(line.rec_yd, 0.0);
        assert_eq!(line.rush_yd, 0.0);
    }

    #[test]
    fn test_sacks_fall_back_to_sack_yardage() {
        let line = StatLine::from_raw(&raw(json!({ "pass_sack_yds": 17 })));
        assert_eq!(line.pass_sack, 3.0);

        let line = StatLine::from_raw(&raw(json!({ "sacks": 1, "pass_sack_yds": 17 })));
        assert_eq!(line.pass_sack, 1.0);
    }

    #[test]
    fn test_empty_bag_is_all_zero() {
        assert_eq!(StatLine::from_raw(&RawPlayerStats::new()), StatLine::default());
    }
}
