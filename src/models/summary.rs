//! Monthly summary read-models.
//!
//! These are assembled per query from stored shift fields and salary
//! contracts. They have no lifecycle of their own.

use serde::{Deserialize, Serialize};

use super::{DeductionResult, PayBasis, PayCycle};

/// One workplace's month for a worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkplaceEarnings {
    /// Workplace identifier.
    pub workplace_id: String,
    /// Workplace display name.
    pub workplace_name: String,
    /// The worker membership the shifts are filed under.
    pub worker_id: String,
    /// The contract's pay cycle.
    pub pay_cycle: PayCycle,
    /// The contract's pay basis.
    pub pay_basis: PayBasis,
    /// Shifts recorded in the month.
    pub shift_count: usize,
    /// Worked minutes less rest over the month's closed shifts.
    pub total_work_minutes: i64,
    /// Sum of night work minutes.
    pub total_night_minutes: i64,
    /// Sum of base pay.
    pub base_pay: i64,
    /// Sum of night allowances.
    pub night_allowance: i64,
    /// Sum of holiday allowance shares.
    pub holiday_allowance: i64,
    /// The month's final gross income for the contract.
    pub gross_income: i64,
    /// Deductions on the month's totals.
    pub deductions: DeductionResult,
    /// Gross income less deductions.
    pub net_income: i64,
    /// Days from today to the next payday; `None` for daily pay.
    pub days_until_payday: Option<i64>,
}

/// A worker's month across all of their workplaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerMonthlySummary {
    /// The user the summary belongs to.
    pub user_id: String,
    /// Summary year.
    pub year: i32,
    /// Summary month (1-12).
    pub month: u32,
    /// One entry per worker membership with a salary contract.
    pub workplaces: Vec<WorkplaceEarnings>,
    /// Sum of `total_work_minutes` over workplaces.
    pub total_work_minutes: i64,
    /// Sum of gross income over workplaces.
    pub total_gross_income: i64,
    /// Sum of net income over workplaces.
    pub total_net_income: i64,
}

/// A single worker's line in the owner's view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerPayLine {
    /// The worker membership.
    pub worker_id: String,
    /// Name the owner knows the worker by.
    pub nickname: String,
    /// Worked minutes less rest over the month's closed shifts.
    pub total_work_minutes: i64,
    /// The month's final gross income.
    pub gross_income: i64,
    /// Gross income less deductions.
    pub net_income: i64,
}

/// One owned workplace's payroll for the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerWorkplaceSummary {
    /// Workplace identifier.
    pub workplace_id: String,
    /// Workplace display name.
    pub workplace_name: String,
    /// Workers with a contract and at least one shift this month.
    pub workers: Vec<WorkerPayLine>,
    /// Sum of gross income over the listed workers.
    pub total_gross_income: i64,
}

/// An owner's month across every workplace they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerMonthlySummary {
    /// The owner's user id.
    pub user_id: String,
    /// Summary year.
    pub year: i32,
    /// Summary month (1-12).
    pub month: u32,
    /// One entry per owned workplace.
    pub workplaces: Vec<OwnerWorkplaceSummary>,
    /// Gross payroll over all workplaces.
    pub total_gross_income: i64,
}

/// The summary returned for a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum MonthlySummary {
    /// The worker-facing view.
    Worker(WorkerMonthlySummary),
    /// The owner-facing view.
    Owner(OwnerMonthlySummary),
}
