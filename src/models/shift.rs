//! Shift record model and its computed earnings.
//!
//! This module defines the [`ShiftRecord`] as stored by the persistence
//! collaborator, together with the [`ShiftEarnings`] block that the
//! recalculation engines overwrite.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// The computed pay fields of a shift.
///
/// Written only by the weekly and monthly recalculation; every field is zero
/// while the shift is still open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftEarnings {
    /// Wall-clock minutes between start and end.
    pub gross_work_minutes: i64,
    /// `max(0, gross_work_minutes - rest_minutes)`.
    pub net_work_minutes: i64,
    /// Minutes falling in the 22:00-06:00 window.
    pub night_work_minutes: i64,
    /// Pay for net minutes at the hourly rate.
    pub base_pay: i64,
    /// 50% premium on night minutes.
    pub night_allowance: i64,
    /// This shift's share of the weekly holiday allowance.
    pub holiday_allowance_share: i64,
    /// `base_pay + night_allowance + holiday_allowance_share`.
    pub gross_income: i64,
    /// Calendar estimate after apportioned monthly deductions.
    pub estimated_net_income: i64,
}

/// One worker's shift.
///
/// # Examples
///
/// ```
/// use shift_pay_engine::models::ShiftRecord;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let shift = ShiftRecord::new(
///     "shift_001",
///     "worker_001",
///     NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
///     NaiveDateTime::parse_from_str("2025-01-06 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     Some(NaiveDateTime::parse_from_str("2025-01-06 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap()),
///     10_000,
/// );
/// assert_eq!(shift.gross_duration_minutes(), Some(480));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Unique identifier for the shift.
    pub id: String,
    /// The worker membership this shift belongs to.
    pub worker_id: String,
    /// The calendar day the shift is filed under.
    pub work_date: NaiveDate,
    /// Planned start.
    pub scheduled_start: NaiveDateTime,
    /// Planned end; `None` for an open-ended shift.
    #[serde(default)]
    pub scheduled_end: Option<NaiveDateTime>,
    /// Clock-in time, once the worker has clocked in.
    #[serde(default)]
    pub actual_start: Option<NaiveDateTime>,
    /// Clock-out time.
    #[serde(default)]
    pub actual_end: Option<NaiveDateTime>,
    /// Unpaid rest taken during the shift.
    #[serde(default)]
    pub rest_minutes: i64,
    /// Hourly rate captured when the shift was created.
    pub hourly_rate: i64,
    /// Links the shifts of a recurring series.
    #[serde(default)]
    pub repeat_group_id: Option<String>,
    /// Fields computed by the engine.
    #[serde(default)]
    pub earnings: ShiftEarnings,
}

impl ShiftRecord {
    /// Creates a scheduled shift with no rest, no clock times and zeroed earnings.
    pub fn new(
        id: impl Into<String>,
        worker_id: impl Into<String>,
        work_date: NaiveDate,
        scheduled_start: NaiveDateTime,
        scheduled_end: Option<NaiveDateTime>,
        hourly_rate: i64,
    ) -> Self {
        Self {
            id: id.into(),
            worker_id: worker_id.into(),
            work_date,
            scheduled_start,
            scheduled_end,
            actual_start: None,
            actual_end: None,
            rest_minutes: 0,
            hourly_rate,
            repeat_group_id: None,
            earnings: ShiftEarnings::default(),
        }
    }

    /// Returns the interval that is paid, truncated to whole minutes.
    ///
    /// Once the worker has clocked in the actual pair governs, so a clocked-in
    /// shift without a clock-out is open even if it has a scheduled end.
    pub fn worked_interval(&self) -> (NaiveDateTime, Option<NaiveDateTime>) {
        match self.actual_start {
            Some(start) => (truncate_to_minute(start), self.actual_end.map(truncate_to_minute)),
            None => (
                truncate_to_minute(self.scheduled_start),
                self.scheduled_end.map(truncate_to_minute),
            ),
        }
    }

    /// Wall-clock minutes from start to end, or `None` for an open shift.
    ///
    /// An end before the start counts as zero minutes.
    pub fn gross_duration_minutes(&self) -> Option<i64> {
        let (start, end) = self.worked_interval();
        end.map(|end| (end - start).num_minutes().max(0))
    }

    /// Gross duration less rest for a closed shift, 0 for an open one.
    ///
    /// Not floored at zero: a rest longer than the shift reduces the period
    /// total, which is what the weekly and monthly hour sums accumulate.
    pub fn recorded_work_minutes(&self) -> i64 {
        self.gross_duration_minutes()
            .map(|gross| gross - self.rest_minutes)
            .unwrap_or(0)
    }
}

fn truncate_to_minute(datetime: NaiveDateTime) -> NaiveDateTime {
    let time = NaiveTime::from_hms_opt(datetime.hour(), datetime.minute(), 0)
        .unwrap_or(datetime.time());
    NaiveDateTime::new(datetime.date(), time)
}
