//! Calendar arithmetic for weeks, months and paydays.

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};
use crate::models::PayCycle;

/// Returns the ISO week `[Monday, Sunday]` containing `date`.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::iso_week_range;
/// use chrono::NaiveDate;
///
/// // 2025-01-01 is a Wednesday
/// let (monday, sunday) = iso_week_range(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
/// assert_eq!(monday, NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
/// assert_eq!(sunday, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
/// ```
pub fn iso_week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    (monday, monday + Duration::days(6))
}

/// Returns the first and last day of a calendar month.
pub fn month_range(year: i32, month: u32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(EngineError::InvalidMonth { year, month })?;
    Ok((first, last_day_of_month(first)))
}

/// Counts the days of a month falling on `weekday`.
pub fn count_weekdays_in_month(year: i32, month: u32, weekday: Weekday) -> EngineResult<i64> {
    let (first, last) = month_range(year, month)?;
    let count = first
        .iter_days()
        .take_while(|day| *day <= last)
        .filter(|day| day.weekday() == weekday)
        .count();
    Ok(count as i64)
}

/// Resolves the payday in the month containing `date`.
///
/// A configured day past the month's end (e.g. 31 in a 30-day month) is
/// clamped to the last day; a day of 0 is treated as 1.
pub fn resolve_monthly_payday(date: NaiveDate, pay_date_of_month: u32) -> NaiveDate {
    let last = last_day_of_month(date);
    let day = pay_date_of_month.clamp(1, last.day());
    last.with_day(day).unwrap_or(last)
}

/// Days from `today` to the next payday, `None` for daily pay.
///
/// A payday falling today counts as zero days away.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::days_until_payday;
/// use shift_pay_engine::models::PayCycle;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
/// let cycle = PayCycle::Monthly { pay_date_of_month: 31 };
///
/// // clamped to Feb 28
/// assert_eq!(days_until_payday(cycle, today), Some(27));
/// ```
pub fn days_until_payday(pay_cycle: PayCycle, today: NaiveDate) -> Option<i64> {
    match pay_cycle {
        PayCycle::Monthly { pay_date_of_month } => {
            let this_month = resolve_monthly_payday(today, pay_date_of_month);
            let payday = if today > this_month {
                let next_month = first_of_month(today)
                    .checked_add_months(Months::new(1))
                    .unwrap_or(today);
                resolve_monthly_payday(next_month, pay_date_of_month)
            } else {
                this_month
            };
            Some((payday - today).num_days())
        }
        PayCycle::Weekly { pay_day_of_week } => {
            let target = i64::from(pay_day_of_week.num_days_from_monday());
            let current = i64::from(today.weekday().num_days_from_monday());
            Some((target - current).rem_euclid(7))
        }
        PayCycle::Daily => None,
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
