//! Calculation logic for the Shift Pay Engine.
//!
//! This module contains the pure pay calculations: per-shift income with the
//! night premium, weekly holiday allowance recomputation, monthly net income
//! estimation, statutory deductions, and the calendar arithmetic behind
//! ISO weeks, months and paydays. Nothing here touches storage; the
//! [`recalculation`](crate::recalculation) and [`summary`](crate::summary)
//! modules drive these functions over a repository.

mod calendar;
mod deduction;
mod monthly_estimate;
mod monthly_income;
mod night_window;
mod shift_income;
mod weekly;

pub use calendar::{
    count_weekdays_in_month, days_until_payday, iso_week_range, month_range,
    resolve_monthly_payday,
};
pub use deduction::{
    INSURANCE_INCOME_THRESHOLD, calculate_deductions, insurance_applicable,
    local_income_tax_rate, minutes_to_hours,
};
pub use monthly_estimate::{MonthEstimate, estimate_month};
pub use monthly_income::monthly_gross_income;
pub use night_window::{NIGHT_END_HOUR, NIGHT_START_HOUR, night_minutes};
pub use shift_income::calculate_shift_income;
pub use weekly::{HOLIDAY_ALLOWANCE_MIN_WEEKLY_MINUTES, WeekRecalculation, recalculate_week};
