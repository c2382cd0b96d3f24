//! Monthly gross income by pay basis and cycle.

use crate::error::EngineResult;
use crate::models::{PayBasis, PayCycle, SalaryConfig};

use super::calendar::count_weekdays_in_month;

/// Gross income a worker earns at one workplace over a calendar month.
///
/// | basis  | cycle   | value                                          |
/// |--------|---------|------------------------------------------------|
/// | Fixed  | Monthly | `fixed_rate`                                   |
/// | Fixed  | Weekly  | `fixed_rate × paydays of that weekday in month`|
/// | Fixed  | Daily   | `fixed_rate × days_worked`                     |
/// | Hourly | any     | `current_gross_sum`                            |
///
/// `current_gross_sum` is the sum of the month's stored shift gross incomes
/// and `days_worked` the number of shifts in the month.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonth`](crate::error::EngineError::InvalidMonth)
/// when a fixed weekly contract is evaluated for a month that does not exist.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::monthly_gross_income;
/// use shift_pay_engine::models::{PayCycle, SalaryConfig};
/// use chrono::Weekday;
///
/// let weekly = SalaryConfig::fixed(100_000, PayCycle::Weekly { pay_day_of_week: Weekday::Fri });
///
/// // January 2025 has five Fridays
/// assert_eq!(monthly_gross_income(&weekly, 2025, 1, 0, 0).unwrap(), 500_000);
/// ```
pub fn monthly_gross_income(
    salary: &SalaryConfig,
    year: i32,
    month: u32,
    current_gross_sum: i64,
    days_worked: i64,
) -> EngineResult<i64> {
    let income = match (salary.pay_basis, salary.pay_cycle) {
        (PayBasis::Hourly, _) => current_gross_sum,
        (PayBasis::Fixed, PayCycle::Monthly { .. }) => salary.fixed_rate,
        (PayBasis::Fixed, PayCycle::Weekly { pay_day_of_week }) => {
            salary.fixed_rate * count_weekdays_in_month(year, month, pay_day_of_week)?
        }
        (PayBasis::Fixed, PayCycle::Daily) => salary.fixed_rate * days_worked,
    };
    Ok(income)
}
