//! Monthly summary aggregation over stored shift fields.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculation::{
    calculate_deductions, days_until_payday, minutes_to_hours, month_range, monthly_gross_income,
};
use crate::config::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DeductionResult, Membership, MonthlySummary, OwnerMonthlySummary, OwnerWorkplaceSummary,
    SalaryConfig, ShiftRecord, WorkerMonthlySummary, WorkerPayLine, WorkplaceEarnings,
};
use crate::store::{ShiftRepository, WorkplaceDirectory};

/// The role a summary is requested under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Viewer {
    /// A worker looking at their own pay.
    Worker,
    /// An owner looking at the payroll of their workplaces.
    Owner,
    /// Platform administrators have no monthly summary.
    Admin,
}

impl std::fmt::Display for Viewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Viewer::Worker => write!(f, "worker"),
            Viewer::Owner => write!(f, "owner"),
            Viewer::Admin => write!(f, "admin"),
        }
    }
}

/// Month totals of one worker at one workplace.
struct MonthTotals {
    shift_count: usize,
    total_work_minutes: i64,
    total_night_minutes: i64,
    base_pay: i64,
    night_allowance: i64,
    holiday_allowance: i64,
    gross_income: i64,
    deductions: DeductionResult,
}

impl MonthTotals {
    fn compute(
        shifts: &[ShiftRecord],
        salary: &SalaryConfig,
        year: i32,
        month: u32,
        rates: &RateTable,
    ) -> EngineResult<Self> {
        let sum = |field: fn(&ShiftRecord) -> i64| shifts.iter().map(field).sum::<i64>();

        // fixed-pay shifts carry no stored minutes, so read the intervals
        let total_work_minutes = sum(ShiftRecord::recorded_work_minutes);
        let gross_sum = sum(|s| s.earnings.gross_income);
        let gross_income = monthly_gross_income(salary, year, month, gross_sum, shifts.len() as i64)?;
        let deductions = calculate_deductions(
            gross_income,
            minutes_to_hours(total_work_minutes),
            salary,
            rates,
        );

        Ok(Self {
            shift_count: shifts.len(),
            total_work_minutes,
            total_night_minutes: sum(|s| s.earnings.night_work_minutes),
            base_pay: sum(|s| s.earnings.base_pay),
            night_allowance: sum(|s| s.earnings.night_allowance),
            holiday_allowance: sum(|s| s.earnings.holiday_allowance_share),
            gross_income,
            deductions,
        })
    }
}

/// Assembles worker and owner monthly summaries.
///
/// Totals are recomputed from the stored per-shift fields on every call;
/// nothing is cached or written.
pub struct SummaryAggregator<'a, R: ?Sized, D: ?Sized> {
    shifts: &'a R,
    directory: &'a D,
    rates: &'a RateTable,
}

impl<'a, R, D> SummaryAggregator<'a, R, D>
where
    R: ShiftRepository + ?Sized,
    D: WorkplaceDirectory + ?Sized,
{
    /// Creates an aggregator over the shift repository and workplace directory.
    pub fn new(shifts: &'a R, directory: &'a D, rates: &'a RateTable) -> Self {
        Self {
            shifts,
            directory,
            rates,
        }
    }

    /// Builds the summary for `viewer`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnsupportedViewer`] for [`Viewer::Admin`]
    /// - [`EngineError::InvalidMonth`] when `year`/`month` is not a month
    /// - any repository error
    pub fn summarize(
        &self,
        viewer: Viewer,
        user_id: &str,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> EngineResult<MonthlySummary> {
        match viewer {
            Viewer::Worker => self
                .worker_summary(user_id, year, month, today)
                .map(MonthlySummary::Worker),
            Viewer::Owner => self
                .owner_summary(user_id, year, month)
                .map(MonthlySummary::Owner),
            Viewer::Admin => {
                warn!(user_id = %user_id, viewer = %viewer, "Monthly summary requested by unsupported viewer");
                Err(EngineError::UnsupportedViewer {
                    viewer: viewer.to_string(),
                })
            }
        }
    }

    /// A worker's month across every workplace where they hold a contract.
    pub fn worker_summary(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> EngineResult<WorkerMonthlySummary> {
        let (first, last) = month_range(year, month)?;

        let mut workplaces = Vec::new();
        for membership in self.directory.memberships_of(user_id)? {
            let Some(salary) = contracted_worker(&membership) else {
                continue;
            };

            let shifts = self.shifts.shifts_in_range(&membership.id, first, last)?;
            let totals = MonthTotals::compute(&shifts, salary, year, month, self.rates)?;

            workplaces.push(WorkplaceEarnings {
                workplace_id: membership.workplace.id.clone(),
                workplace_name: membership.workplace.name.clone(),
                worker_id: membership.id.clone(),
                pay_cycle: salary.pay_cycle,
                pay_basis: salary.pay_basis,
                shift_count: totals.shift_count,
                total_work_minutes: totals.total_work_minutes,
                total_night_minutes: totals.total_night_minutes,
                base_pay: totals.base_pay,
                night_allowance: totals.night_allowance,
                holiday_allowance: totals.holiday_allowance,
                gross_income: totals.gross_income,
                deductions: totals.deductions,
                net_income: totals.deductions.net_income,
                days_until_payday: days_until_payday(salary.pay_cycle, today),
            });
        }

        debug!(
            user_id = %user_id,
            year,
            month,
            workplaces_count = workplaces.len(),
            "Worker summary assembled"
        );

        Ok(WorkerMonthlySummary {
            user_id: user_id.to_string(),
            year,
            month,
            total_work_minutes: workplaces.iter().map(|w| w.total_work_minutes).sum(),
            total_gross_income: workplaces.iter().map(|w| w.gross_income).sum(),
            total_net_income: workplaces.iter().map(|w| w.net_income).sum(),
            workplaces,
        })
    }

    /// The payroll of every workplace the user owns.
    ///
    /// Workers without a contract or without a shift in the month are left
    /// out rather than listed with zeros.
    pub fn owner_summary(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<OwnerMonthlySummary> {
        let (first, last) = month_range(year, month)?;

        let mut workplaces = Vec::new();
        for workplace in self.directory.workplaces_owned_by(user_id)? {
            let contracted: Vec<(Membership, SalaryConfig)> = self
                .directory
                .members_of(&workplace.id)?
                .into_iter()
                .filter_map(|m| contracted_worker(&m).cloned().map(|salary| (m, salary)))
                .collect();

            let worker_ids: Vec<String> = contracted.iter().map(|(m, _)| m.id.clone()).collect();
            let mut shifts_by_worker: HashMap<String, Vec<ShiftRecord>> = HashMap::new();
            for shift in self.shifts.shifts_for_workers(&worker_ids, first, last)? {
                shifts_by_worker
                    .entry(shift.worker_id.clone())
                    .or_default()
                    .push(shift);
            }

            let mut workers = Vec::new();
            for (membership, salary) in &contracted {
                let Some(shifts) = shifts_by_worker.get(&membership.id) else {
                    continue;
                };
                let totals = MonthTotals::compute(shifts, salary, year, month, self.rates)?;
                workers.push(WorkerPayLine {
                    worker_id: membership.id.clone(),
                    nickname: membership.nickname.clone(),
                    total_work_minutes: totals.total_work_minutes,
                    gross_income: totals.gross_income,
                    net_income: totals.deductions.net_income,
                });
            }

            workplaces.push(OwnerWorkplaceSummary {
                workplace_id: workplace.id,
                workplace_name: workplace.name,
                total_gross_income: workers.iter().map(|w| w.gross_income).sum(),
                workers,
            });
        }

        debug!(
            user_id = %user_id,
            year,
            month,
            workplaces_count = workplaces.len(),
            "Owner summary assembled"
        );

        Ok(OwnerMonthlySummary {
            user_id: user_id.to_string(),
            year,
            month,
            total_gross_income: workplaces.iter().map(|w| w.total_gross_income).sum(),
            workplaces,
        })
    }
}

/// The contract of a worker membership; `None` for owners and uncontracted workers.
fn contracted_worker(membership: &Membership) -> Option<&SalaryConfig> {
    if membership.is_worker() {
        membership.salary.as_ref()
    } else {
        None
    }
}
