//! Recalculation commands.
//!
//! A shift write produces a command value instead of recomputing inline, so
//! callers can batch and deduplicate the work before executing it.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculation::iso_week_range;

/// The range a recalculation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecalculationScope {
    /// The ISO week containing the anchor, cascading to the anchor's month.
    Week,
    /// The calendar month containing the anchor.
    Month,
}

/// A request to recompute one worker's stored shift fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalculationCommand {
    /// Worker whose shifts are recomputed.
    pub worker_id: String,
    /// Week or month.
    pub scope: RecalculationScope,
    /// Any date inside the range to recompute.
    pub anchor: NaiveDate,
}

/// Identity of the range a command recomputes.
///
/// Two commands with the same key do identical work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecalculationKey {
    /// A worker's ISO week, by its Monday.
    Week {
        /// Worker id.
        worker_id: String,
        /// Monday of the week.
        monday: NaiveDate,
    },
    /// A worker's calendar month.
    Month {
        /// Worker id.
        worker_id: String,
        /// Calendar year.
        year: i32,
        /// Calendar month (1-12).
        month: u32,
    },
}

impl RecalculationCommand {
    /// Recompute the ISO week containing `anchor`, then its month.
    pub fn week(worker_id: impl Into<String>, anchor: NaiveDate) -> Self {
        Self {
            worker_id: worker_id.into(),
            scope: RecalculationScope::Week,
            anchor,
        }
    }

    /// Recompute the estimates of the month containing `anchor`.
    pub fn month(worker_id: impl Into<String>, anchor: NaiveDate) -> Self {
        Self {
            worker_id: worker_id.into(),
            scope: RecalculationScope::Month,
            anchor,
        }
    }

    /// The month command a week command cascades into.
    pub fn cascade(&self) -> Option<Self> {
        match self.scope {
            RecalculationScope::Week => Some(Self::month(self.worker_id.clone(), self.anchor)),
            RecalculationScope::Month => None,
        }
    }

    /// Returns the key identifying the range this command covers.
    pub fn key(&self) -> RecalculationKey {
        match self.scope {
            RecalculationScope::Week => RecalculationKey::Week {
                worker_id: self.worker_id.clone(),
                monday: iso_week_range(self.anchor).0,
            },
            RecalculationScope::Month => self.month_key(),
        }
    }

    fn month_key(&self) -> RecalculationKey {
        RecalculationKey::Month {
            worker_id: self.worker_id.clone(),
            year: self.anchor.year(),
            month: self.anchor.month(),
        }
    }
}

/// Collapses a batch of commands into the minimal equivalent set.
///
/// Week commands are kept once each, in first-seen order. Month commands
/// follow every week so their estimates read the final week writes. A
/// duplicate week anchored in a different month contributes that month. A
/// month is left to the week cascades when the last week touching it
/// cascades into it; otherwise an explicit month command reruns it at the
/// end.
///
/// # Example
///
/// ```
/// use shift_pay_engine::recalculation::{RecalculationCommand, coalesce};
/// use chrono::NaiveDate;
///
/// let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let friday = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
///
/// let commands = coalesce(vec![
///     RecalculationCommand::month("w1", friday),
///     RecalculationCommand::week("w1", monday),
///     RecalculationCommand::week("w1", friday),
/// ]);
/// assert_eq!(commands, vec![RecalculationCommand::week("w1", monday)]);
/// ```
pub fn coalesce(
    commands: impl IntoIterator<Item = RecalculationCommand>,
) -> Vec<RecalculationCommand> {
    let mut seen = HashSet::new();
    let mut weeks = Vec::new();
    let mut months = Vec::new();
    for command in commands {
        let command = if seen.insert(command.key()) {
            command
        } else {
            // the same week anchored in another month still owes that month
            match command.cascade() {
                Some(month) if seen.insert(month.key()) => month,
                _ => continue,
            }
        };
        match command.scope {
            RecalculationScope::Week => weeks.push(command),
            RecalculationScope::Month => months.push(command),
        }
    }

    let mut pending = HashSet::new();
    let months: Vec<RecalculationCommand> = months
        .into_iter()
        .chain(weeks.iter().filter_map(RecalculationCommand::cascade))
        .filter(|month| pending.insert(month.key()))
        .filter(|month| !settled_by_cascade(month, &weeks))
        .collect();

    weeks.extend(months);
    weeks
}

/// True when the last week writing into `month` cascades into it.
fn settled_by_cascade(month: &RecalculationCommand, weeks: &[RecalculationCommand]) -> bool {
    let key = month.key();
    weeks
        .iter()
        .rev()
        .find(|week| week.worker_id == month.worker_id && week_touches_month(week, month.anchor))
        .and_then(RecalculationCommand::cascade)
        .is_some_and(|cascade| cascade.key() == key)
}

fn week_touches_month(week: &RecalculationCommand, anchor: NaiveDate) -> bool {
    let (monday, sunday) = iso_week_range(week.anchor);
    [monday, sunday]
        .iter()
        .any(|day| day.year() == anchor.year() && day.month() == anchor.month())
}
