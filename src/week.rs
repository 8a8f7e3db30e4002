//! Playoff weeks and their derived lock state.
//!
//! A week is locked when its manual flag is set or its deadline has passed.
//! Lock state is never stored; callers pass the current time on every check.

use crate::WeekNumber;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One playoff round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Week {
    pub number: WeekNumber,
    pub label: String,
    pub deadline: Option<DateTime<Utc>>,
    pub is_locked: bool,
}

/// Submission state of a week at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeekState {
    Open,
    Locked,
}

/// Locked if the manual flag is set, or a deadline exists and `now` is past it.
pub fn is_week_locked(now: DateTime<Utc>, deadline: Option<DateTime<Utc>>, manual_lock: bool) -> bool {
    if manual_lock {
        return true;
    }
    deadline.is_some_and(|deadline| now > deadline)
}

impl Week {
    pub fn new(number: WeekNumber, label: impl Into<String>) -> Self {
        Self {
            number,
            label: label.into(),
            deadline: None,
            is_locked: false,
        }
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn locked(mut self) -> Self {
        self.is_locked = true;
        self
    }

    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        is_week_locked(now, self.deadline, self.is_locked)
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> WeekState {
        if self.is_locked_at(now) {
            WeekState::Locked
        } else {
            WeekState::Open
        }
    }
}

/// The four playoff rounds, unlocked and without deadlines.
pub fn default_weeks() -> Vec<Week> {
    WeekNumber::PLAYOFF_WEEKS
        .iter()
        .map(|number| Week::new(*number, number.label().unwrap_or_default()))
        .collect()
}

/// First week (by number) still accepting submissions by deadline,
/// or the last week once every deadline has passed.
///
/// Only deadlines are considered; a manually locked week can still be current.
pub fn current_week(weeks: &[Week], now: DateTime<Utc>) -> Option<&Week> {
    let mut ordered: Vec<&Week> = weeks.iter().collect();
    ordered.sort_by_key(|w| w.number);

    ordered
        .iter()
        .find(|w| w.deadline.map_or(true, |deadline| now < deadline))
        .or_else(|| ordered.last())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2026-01-10T18:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_past_deadline_locks_without_flag() {
        let deadline = now() - Duration::minutes(1);
        assert!(is_week_locked(now(), Some(deadline), false));
    }

    #[test]
    fn test_manual_flag_locks_regardless_of_deadline() {
        let future = now() + Duration::days(2);
        assert!(is_week_locked(now(), Some(future), true));
        assert!(is_week_locked(now(), None, true));
    }

    #[test]
    fn test_open_without_deadline_or_flag() {
        assert!(!is_week_locked(now(), None, false));
        assert!(!is_week_locked(now(), Some(now() + Duration::hours(1)), false));
    }

    #[test]
    fn test_deadline_instant_is_still_open() {
        assert!(!is_week_locked(now(), Some(now()), false));
    }

    #[test]
    fn test_clearing_flag_does_not_reopen_past_deadline() {
        let week = Week::new(WeekNumber::new(1), "Wild Card")
            .with_deadline(now() - Duration::hours(3))
            .locked();
        assert_eq!(week.state_at(now()), WeekState::Locked);

        let unlocked = Week {
            is_locked: false,
            ..week
        };
        assert_eq!(unlocked.state_at(now()), WeekState::Locked);
    }

    #[test]
    fn test_lock_state_follows_the_clock() {
        let week = Week::new(WeekNumber::new(2), "Divisional").with_deadline(now());
        assert_eq!(week.state_at(now() - Duration::seconds(1)), WeekState::Open);
        assert_eq!(week.state_at(now() + Duration::seconds(1)), WeekState::Locked);
    }

    #[test]
    fn test_default_weeks() {
        let weeks = default_weeks();
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[0].label, "Wild Card");
        assert_eq!(weeks[3].number, WeekNumber::new(4));
        assert!(weeks.iter().all(|w| !w.is_locked && w.deadline.is_none()));
    }

    #[test]
    fn test_current_week_is_first_open_deadline() {
        let weeks = vec![
            Week::new(WeekNumber::new(2), "Divisional").with_deadline(now() + Duration::days(7)),
            Week::new(WeekNumber::new(1), "Wild Card").with_deadline(now() - Duration::days(1)),
            Week::new(WeekNumber::new(3), "Conference Championship"),
        ];
        let current = current_week(&weeks, now()).unwrap();
        assert_eq!(current.number, WeekNumber::new(2));
    }

    #[test]
    fn test_current_week_falls_back_to_last() {
        let weeks = vec![
            Week::new(WeekNumber::new(1), "Wild Card").with_deadline(now() - Duration::days(8)),
            Week::new(WeekNumber::new(2), "Divisional").with_deadline(now() - Duration::days(1)),
        ];
        assert_eq!(
            current_week(&weeks, now()).unwrap().number,
            WeekNumber::new(2)
        );
        assert!(current_week(&[], now()).is_none());
    }
}
