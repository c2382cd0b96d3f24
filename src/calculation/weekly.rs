//! Weekly holiday allowance and shift recomputation.
//!
//! A worker whose recorded minutes in an ISO week reach
//! [`HOLIDAY_ALLOWANCE_MIN_WEEKLY_MINUTES`] earns a weekly holiday allowance
//! worth one average working day. The allowance is spread evenly over the
//! week's shifts, so adding or removing any shift changes every other shift's
//! income in the same week.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{SalaryConfig, ShiftRecord};

use super::shift_income::calculate_shift_income;

/// Weekly minutes (15 hours) from which the holiday allowance accrues.
pub const HOLIDAY_ALLOWANCE_MIN_WEEKLY_MINUTES: i64 = 900;

/// The outcome of recomputing one worker's ISO week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRecalculation {
    /// Σ(gross duration − rest) over the closed shifts of the week.
    pub weekly_work_minutes: i64,
    /// The week's allowance, zero when not eligible.
    pub weekly_holiday_allowance: i64,
    /// Share credited to each shift; the division remainder is dropped.
    pub daily_holiday_allowance_share: i64,
    /// Every shift of the week with its earnings recomputed.
    pub shifts: Vec<ShiftRecord>,
}

/// Recomputes every shift of an ISO week.
///
/// Returns `None` for fixed pay, whose shifts carry no computed income.
/// Shifts are returned ordered by work date, start and id; the first of them
/// supplies the hourly rate the allowance is priced at.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::recalculate_week;
/// use shift_pay_engine::models::{SalaryConfig, ShiftRecord};
/// use chrono::{Duration, NaiveDate};
///
/// let mut salary = SalaryConfig::hourly(10_000, 10);
/// salary.has_holiday_allowance = true;
///
/// let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let shifts: Vec<ShiftRecord> = (0..5)
///     .map(|day| {
///         let date = monday + Duration::days(day);
///         let start = date.and_hms_opt(9, 0, 0).unwrap();
///         ShiftRecord::new(format!("s{day}"), "w1", date, start, Some(start + Duration::hours(3)), 10_000)
///     })
///     .collect();
///
/// let week = recalculate_week(&shifts, &salary).unwrap();
/// assert_eq!(week.weekly_work_minutes, 900);
/// // 15h over 5 shifts = 3h average day
/// assert_eq!(week.weekly_holiday_allowance, 30_000);
/// assert_eq!(week.daily_holiday_allowance_share, 6_000);
/// ```
pub fn recalculate_week(shifts: &[ShiftRecord], salary: &SalaryConfig) -> Option<WeekRecalculation> {
    if !salary.is_hourly() {
        return None;
    }

    let mut ordered = shifts.to_vec();
    ordered.sort_by(|a, b| {
        (a.work_date, a.scheduled_start, &a.id).cmp(&(b.work_date, b.scheduled_start, &b.id))
    });

    let weekly_work_minutes: i64 = ordered.iter().map(ShiftRecord::recorded_work_minutes).sum();
    let shift_count = ordered.len() as i64;

    let weekly_holiday_allowance = match ordered.first() {
        Some(first)
            if salary.has_holiday_allowance
                && weekly_work_minutes >= HOLIDAY_ALLOWANCE_MIN_WEEKLY_MINUTES =>
        {
            weekly_holiday_allowance(weekly_work_minutes, shift_count, first.hourly_rate)
        }
        _ => 0,
    };

    let daily_holiday_allowance_share = if shift_count > 0 {
        weekly_holiday_allowance.div_euclid(shift_count)
    } else {
        0
    };

    let shifts = ordered
        .iter()
        .map(|shift| {
            calculate_shift_income(
                shift,
                daily_holiday_allowance_share,
                salary.has_night_allowance,
            )
        })
        .collect();

    Some(WeekRecalculation {
        weekly_work_minutes,
        weekly_holiday_allowance,
        daily_holiday_allowance_share,
        shifts,
    })
}

/// `round(weekly_minutes / 60 / shift_count × hourly_rate)`, half away from zero.
fn weekly_holiday_allowance(weekly_work_minutes: i64, shift_count: i64, hourly_rate: i64) -> i64 {
    if shift_count == 0 {
        return 0;
    }
    let amount = Decimal::from(weekly_work_minutes * hourly_rate) / Decimal::from(60 * shift_count);
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}
