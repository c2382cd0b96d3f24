//! Monthly net income estimation for calendar display.
//!
//! The month's projected deductions are spread evenly over the shifts worked
//! so each calendar day can show an approximate take-home amount.

use serde::{Deserialize, Serialize};

use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{SalaryConfig, ShiftRecord};

use super::deduction::{calculate_deductions, minutes_to_hours};
use super::monthly_income::monthly_gross_income;

/// The outcome of estimating one worker's month at one workplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthEstimate {
    /// Projected gross income for the month.
    pub estimated_monthly_income: i64,
    /// Σ(gross duration − rest) over the closed shifts of the month.
    pub estimated_total_minutes: i64,
    /// Total deductions on the projected income.
    pub estimated_monthly_deduction: i64,
    /// Deduction charged against each worked day.
    pub estimated_daily_deduction: i64,
    /// The month's shifts with `estimated_net_income` set.
    pub shifts: Vec<ShiftRecord>,
}

/// Estimates the month and sets each shift's `estimated_net_income`.
///
/// Returns `Ok(None)` for a month without shifts; the caller resets the
/// stored estimates for the range instead.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonth`](crate::error::EngineError::InvalidMonth)
/// when `year`/`month` do not name a calendar month and the contract needs
/// the calendar (fixed weekly pay).
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::estimate_month;
/// use shift_pay_engine::config::RateTable;
/// use shift_pay_engine::models::{SalaryConfig, ShiftRecord};
/// use chrono::{Duration, NaiveDate};
///
/// let mut salary = SalaryConfig::hourly(10_000, 10);
/// salary.has_income_tax = true;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let start = date.and_hms_opt(9, 0, 0).unwrap();
/// let mut shift = ShiftRecord::new("s1", "w1", date, start, Some(start + Duration::hours(8)), 10_000);
/// shift.earnings.gross_income = 80_000;
///
/// let estimate = estimate_month(&[shift], &salary, 2025, 1, &RateTable::default())
///     .unwrap()
///     .unwrap();
///
/// // income tax 2,400 plus local income tax 240
/// assert_eq!(estimate.estimated_daily_deduction, 2_640);
/// assert_eq!(estimate.shifts[0].earnings.estimated_net_income, 77_360);
/// ```
pub fn estimate_month(
    shifts: &[ShiftRecord],
    salary: &SalaryConfig,
    year: i32,
    month: u32,
    rates: &RateTable,
) -> EngineResult<Option<MonthEstimate>> {
    if shifts.is_empty() {
        return Ok(None);
    }

    let days_worked = shifts.len() as i64;
    let current_gross_sum: i64 = shifts.iter().map(|s| s.earnings.gross_income).sum();

    let estimated_monthly_income =
        monthly_gross_income(salary, year, month, current_gross_sum, days_worked)?;
    let estimated_total_minutes: i64 = shifts.iter().map(ShiftRecord::recorded_work_minutes).sum();

    let estimated_monthly_deduction = calculate_deductions(
        estimated_monthly_income,
        minutes_to_hours(estimated_total_minutes),
        salary,
        rates,
    )
    .total_deductions;
    let estimated_daily_deduction = estimated_monthly_deduction.div_euclid(days_worked);

    let shifts = shifts
        .iter()
        .map(|shift| {
            let mut estimated = shift.clone();
            estimated.earnings.estimated_net_income =
                (shift.earnings.gross_income - estimated_daily_deduction).max(0);
            estimated
        })
        .collect();

    Ok(Some(MonthEstimate {
        estimated_monthly_income,
        estimated_total_minutes,
        estimated_monthly_deduction,
        estimated_daily_deduction,
        shifts,
    }))
}
