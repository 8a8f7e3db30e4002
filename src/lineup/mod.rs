//! Lineups and the rules that decide whether one is legal for a week.
//!
//! - `validation`: pure rule checks over already-fetched data
//! - `store`: the lookup/persistence collaborator the checks are fed from
//! - `submission`: lock-aware submit and remove workflows

pub mod store;
pub mod submission;
pub mod validation;

pub use store::LineupStore;
pub use submission::{remove_lineup, submit_lineup};
pub use validation::{validate_lineup, validate_submission, LineupContext};

use crate::{ManagerId, PlayerId, Slot, WeekNumber};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The five players of a lineup, one per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupSlots {
    pub qb: PlayerId,
    pub rb: PlayerId,
    pub wr: PlayerId,
    pub te: PlayerId,
    pub flex: PlayerId,
}

impl LineupSlots {
    pub fn get(&self, slot: Slot) -> PlayerId {
        match slot {
            Slot::Qb => self.qb,
            Slot::Rb => self.rb,
            Slot::Wr => self.wr,
            Slot::Te => self.te,
            Slot::Flex => self.flex,
        }
    }

    /// Slots paired with their players, in QB, RB, WR, TE, FLEX order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, PlayerId)> + '_ {
        Slot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }

    pub fn player_ids(&self) -> [PlayerId; 5] {
        [self.qb, self.rb, self.wr, self.te, self.flex]
    }
}

/// One manager's lineup for one week; unique per (manager, week).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub manager_id: ManagerId,
    pub week: WeekNumber,
    pub slots: LineupSlots,
}

/// What a validation error refers to: a single slot or the lineup as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineupField {
    Slot(Slot),
    Lineup,
}

impl fmt::Display for LineupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineupField::Slot(slot) => write!(f, "{}", slot),
            LineupField::Lineup => write!(f, "lineup"),
        }
    }
}

impl Serialize for LineupField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A user-facing reason a lineup was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: LineupField,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: LineupField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}
