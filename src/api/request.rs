//! Request types for the Shift Pay Engine API.
//!
//! This module defines the JSON request bodies for the calculation endpoints.
//! Shifts and salary contracts are accepted in their model form.

use serde::{Deserialize, Serialize};

use crate::models::{SalaryConfig, ShiftRecord};

/// Request body for `POST /shifts/income`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftIncomeRequest {
    /// The shift to compute.
    pub shift: ShiftRecord,
    /// Holiday allowance share to credit the shift with.
    #[serde(default)]
    pub daily_holiday_allowance_share: i64,
    /// Whether night minutes earn the premium.
    #[serde(default)]
    pub night_allowance_enabled: bool,
}

/// Request body for `POST /deductions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRequest {
    /// Gross income of the period.
    pub gross_income: i64,
    /// Net work minutes of the period.
    pub total_work_minutes: i64,
    /// The contract whose flags gate each deduction.
    pub salary: SalaryConfig,
}

/// Request body for `POST /weeks/recalculate`.
///
/// All shifts must belong to one worker and fall in one ISO week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekRecalculationRequest {
    /// The worker's contract.
    pub salary: SalaryConfig,
    /// Every shift of the week.
    pub shifts: Vec<ShiftRecord>,
}

/// Request body for `POST /months/estimate`.
///
/// All shifts must belong to one worker and be dated in the given month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthEstimateRequest {
    /// The worker's contract.
    pub salary: SalaryConfig,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Every shift of the month, with computed gross income.
    pub shifts: Vec<ShiftRecord>,
}
