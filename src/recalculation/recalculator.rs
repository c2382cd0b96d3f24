//! Executes recalculation commands against a shift repository.

use chrono::Datelike;
use tracing::{debug, info};

use crate::calculation::{
    MonthEstimate, WeekRecalculation, estimate_month, iso_week_range, month_range,
    recalculate_week,
};
use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::SalaryConfig;
use crate::store::ShiftRepository;

use super::command::{RecalculationCommand, RecalculationScope};

/// What executing one command wrote back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecalculationReport {
    /// The week step, absent for month commands and fixed pay.
    pub week: Option<WeekRecalculation>,
    /// The month step, absent when the month had no shifts and was reset.
    pub month: Option<MonthEstimate>,
}

/// Drives the weekly and monthly calculations over a [`ShiftRepository`].
///
/// Every step reads the whole range, recomputes it, and writes the result in
/// one batch, so executing the same command twice leaves the same stored
/// fields.
pub struct Recalculator<'a, R: ShiftRepository + ?Sized> {
    repository: &'a R,
    rates: &'a RateTable,
}

impl<'a, R: ShiftRepository + ?Sized> Recalculator<'a, R> {
    /// Creates a recalculator over a repository and the process rate table.
    pub fn new(repository: &'a R, rates: &'a RateTable) -> Self {
        Self { repository, rates }
    }

    /// Executes one command for a worker under `salary`.
    ///
    /// A week command recomputes the ISO week, writes it, then runs the month
    /// command for the anchor's month. The two writes are separate batches;
    /// if the month write fails the week's shift fields are already stored.
    pub fn execute(
        &self,
        command: &RecalculationCommand,
        salary: &SalaryConfig,
    ) -> EngineResult<RecalculationReport> {
        debug!(
            worker_id = %command.worker_id,
            scope = ?command.scope,
            anchor = %command.anchor,
            "Executing recalculation"
        );

        match command.scope {
            RecalculationScope::Week => {
                let week = self.recalculate_week(command, salary)?;
                let month = match command.cascade() {
                    Some(cascade) => self.recalculate_month(&cascade, salary)?,
                    None => None,
                };
                Ok(RecalculationReport { week, month })
            }
            RecalculationScope::Month => Ok(RecalculationReport {
                week: None,
                month: self.recalculate_month(command, salary)?,
            }),
        }
    }

    fn recalculate_week(
        &self,
        command: &RecalculationCommand,
        salary: &SalaryConfig,
    ) -> EngineResult<Option<WeekRecalculation>> {
        if !salary.is_hourly() {
            debug!(worker_id = %command.worker_id, "Fixed pay, skipping week");
            return Ok(None);
        }

        let (monday, sunday) = iso_week_range(command.anchor);
        let shifts = self
            .repository
            .shifts_in_range(&command.worker_id, monday, sunday)?;

        let Some(week) = recalculate_week(&shifts, salary) else {
            return Ok(None);
        };

        self.repository.update_computed_fields(&week.shifts)?;
        info!(
            worker_id = %command.worker_id,
            week_start = %monday,
            shifts_count = week.shifts.len(),
            weekly_work_minutes = week.weekly_work_minutes,
            weekly_holiday_allowance = week.weekly_holiday_allowance,
            "Week recalculated"
        );
        Ok(Some(week))
    }

    fn recalculate_month(
        &self,
        command: &RecalculationCommand,
        salary: &SalaryConfig,
    ) -> EngineResult<Option<MonthEstimate>> {
        let (year, month) = (command.anchor.year(), command.anchor.month());
        let (first, last) = month_range(year, month)?;
        let shifts = self
            .repository
            .shifts_in_range(&command.worker_id, first, last)?;

        match estimate_month(&shifts, salary, year, month, self.rates)? {
            Some(estimate) => {
                self.repository.update_computed_fields(&estimate.shifts)?;
                info!(
                    worker_id = %command.worker_id,
                    year,
                    month,
                    shifts_count = estimate.shifts.len(),
                    estimated_monthly_income = estimate.estimated_monthly_income,
                    estimated_daily_deduction = estimate.estimated_daily_deduction,
                    "Month estimated"
                );
                Ok(Some(estimate))
            }
            None => {
                self.repository
                    .reset_estimated_net_income(&command.worker_id, first, last)?;
                debug!(
                    worker_id = %command.worker_id,
                    year,
                    month,
                    "No shifts in month, estimates reset"
                );
                Ok(None)
            }
        }
    }
}
