use super::stats::{RawPlayerStats, StatLine};

#[cfg(test)]
mod tests;

const PASS_YARDS_PER_POINT: f64 = 25.0;
const RUSH_YARDS_PER_POINT: f64 = 10.0;
const REC_YARDS_PER_POINT: f64 = 10.0;

/// (threshold, bonus) pairs, highest threshold first; only the first match applies.
const PASS_YARDAGE_TIERS: [(f64, f64); 2] = [(400.0, 4.0), (300.0, 2.0)];
const RUSH_YARDAGE_TIERS: [(f64, f64); 2] = [(200.0, 2.0), (100.0, 1.0)];
const REC_YARDAGE_TIERS: [(f64, f64); 2] = [(200.0, 2.0), (100.0, 1.0)];

const PASS_TD: f64 = 4.0;
const RUSH_TD: f64 = 6.0;
const REC_TD: f64 = 6.0;
const INTERCEPTION: f64 = -2.0;
const SACK: f64 = -0.5;
const RECEPTION: f64 = 0.5;
const FUMBLE: f64 = -1.0;
const FUMBLE_LOST: f64 = -1.0;
const FUMBLE_RECOVERY_TD: f64 = 6.0;
const TWO_POINT_CONVERSION: f64 = 2.0;

const TD_50_PLUS_BONUS: f64 = 2.0;
const TD_40_TO_49_BONUS: f64 = 1.0;

/// Fantasy points for one player's raw stats, rounded to two decimals.
///
/// Never fails: absent or malformed counters score as zero.
pub fn calculate_score(stats: &RawPlayerStats) -> f64 {
    score_stat_line(&StatLine::from_raw(stats))
}

/// Fantasy points for an already-normalized stat line.
pub fn score_stat_line(line: &StatLine) -> f64 {
    let mut total = 0.0;

    // Passing
    total += yardage_points(line.pass_yd, PASS_YARDS_PER_POINT, &PASS_YARDAGE_TIERS);
    total += line.pass_td * PASS_TD;
    total += line.pass_int * INTERCEPTION;
    total += line.pass_sack * SACK;
    total += distance_bonus(line.pass_td_40p, line.pass_td_50p);

    // Rushing
    total += yardage_points(line.rush_yd, RUSH_YARDS_PER_POINT, &RUSH_YARDAGE_TIERS);
    total += line.rush_td * RUSH_TD;
    total += distance_bonus(line.rush_td_40p, line.rush_td_50p);

    // Receiving
    total += line.rec * RECEPTION;
    total += yardage_points(line.rec_yd, REC_YARDS_PER_POINT, &REC_YARDAGE_TIERS);
    total += line.rec_td * REC_TD;
    total += distance_bonus(line.rec_td_40p, line.rec_td_50p);

    // Misc
    total += line.fum * FUMBLE;
    total += line.fum_lost * FUMBLE_LOST;
    total += line.fum_rec_td * FUMBLE_RECOVERY_TD;
    total += (line.pass_2pt + line.rush_2pt + line.rec_2pt) * TWO_POINT_CONVERSION;

    round_points(total)
}

/// Floor of yards per point plus the highest threshold bonus reached.
pub fn yardage_points(yards: f64, yards_per_point: f64, tiers: &[(f64, f64)]) -> f64 {
    let base = (yards / yards_per_point).floor();
    let bonus = tiers
        .iter()
        .find(|(threshold, _)| yards >= *threshold)
        .map_or(0.0, |(_, bonus)| *bonus);
    base + bonus
}

/// Long-touchdown bonus: +2 per 50+ yard TD, +1 per TD in the 40-49 band.
///
/// `td_40p` includes the 50+ touchdowns; a malformed `td_40p < td_50p`
/// contributes no 40-49 band points instead of a negative adjustment.
pub fn distance_bonus(td_40p: f64, td_50p: f64) -> f64 {
    let band_40_49 = (td_40p - td_50p).max(0.0);
    td_50p * TD_50_PLUS_BONUS + band_40_49 * TD_40_TO_49_BONUS
}

/// Round to two decimals, ties away from zero.
pub fn round_points(points: f64) -> f64 {
    (points * 100.0).round() / 100.0
}
