//! Scoring engine: raw stats in, fantasy points out.
//!
//! - `stats`: raw stat bags and normalization to a canonical `StatLine`
//! - `compute`: the point schedule

pub mod compute;
pub mod stats;

pub use compute::{calculate_score, score_stat_line};
pub use stats::{RawPlayerStats, StatLine};

use crate::PlayerId;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Score every player in a fetched batch.
pub fn score_batch(stats: &BTreeMap<PlayerId, RawPlayerStats>) -> BTreeMap<PlayerId, f64> {
    stats
        .par_iter()
        .map(|(player_id, raw)| (*player_id, calculate_score(raw)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_batch_scores_each_player() {
        let mut stats = BTreeMap::new();
        stats.insert(PlayerId::new(1), RawPlayerStats::new().with("rec", 4.0));
        stats.insert(PlayerId::new(2), RawPlayerStats::new().with("rush_td", 1.0));
        stats.insert(PlayerId::new(3), RawPlayerStats::new());

        let scores = score_batch(&stats);
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[&PlayerId::new(1)], 2.0);
        assert_eq!(scores[&PlayerId::new(2)], 6.0);
        assert_eq!(scores[&PlayerId::new(3)], 0.0);
    }
}
