//! Salary configuration model.
//!
//! This module defines the [`SalaryConfig`] contract a worker has at a
//! workplace, with its [`PayCycle`] and [`PayBasis`].

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// How often pay is disbursed, with the payday that goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cycle", rename_all = "snake_case")]
pub enum PayCycle {
    /// Paid once a month on the given day (clamped to short months).
    Monthly {
        /// Day of month, 1-31.
        pay_date_of_month: u32,
    },
    /// Paid every week on the given weekday.
    Weekly {
        /// The weekday pay is disbursed.
        pay_day_of_week: Weekday,
    },
    /// Paid per worked day.
    Daily,
}

/// Whether pay derives from worked hours or a fixed recurring amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayBasis {
    /// Pay follows the minutes actually worked.
    Hourly,
    /// A fixed amount per pay cycle.
    Fixed,
}

/// One worker's pay contract at a workplace.
///
/// Owned by an external collaborator; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryConfig {
    /// Disbursement frequency and payday.
    pub pay_cycle: PayCycle,
    /// Hourly or fixed pay.
    pub pay_basis: PayBasis,
    /// Contracted hourly rate (meaningful for hourly pay).
    #[serde(default)]
    pub hourly_rate: i64,
    /// Fixed amount per cycle (meaningful for fixed pay).
    #[serde(default)]
    pub fixed_rate: i64,
    /// National pension is withheld.
    #[serde(default)]
    pub has_national_pension: bool,
    /// Health insurance (with long-term care) is withheld.
    #[serde(default)]
    pub has_health_insurance: bool,
    /// Employment insurance is withheld.
    #[serde(default)]
    pub has_employment_insurance: bool,
    /// Income tax (with local income tax) is withheld.
    #[serde(default)]
    pub has_income_tax: bool,
    /// Weekly holiday allowance accrues.
    #[serde(default)]
    pub has_holiday_allowance: bool,
    /// Night work earns the 50% premium.
    #[serde(default)]
    pub has_night_allowance: bool,
}

impl SalaryConfig {
    /// An hourly contract paid monthly with every deduction and allowance disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_pay_engine::models::{PayBasis, SalaryConfig};
    ///
    /// let salary = SalaryConfig::hourly(10_030, 10);
    /// assert_eq!(salary.pay_basis, PayBasis::Hourly);
    /// assert!(salary.is_hourly());
    /// ```
    pub fn hourly(hourly_rate: i64, pay_date_of_month: u32) -> Self {
        Self {
            pay_cycle: PayCycle::Monthly { pay_date_of_month },
            pay_basis: PayBasis::Hourly,
            hourly_rate,
            fixed_rate: 0,
            has_national_pension: false,
            has_health_insurance: false,
            has_employment_insurance: false,
            has_income_tax: false,
            has_holiday_allowance: false,
            has_night_allowance: false,
        }
    }

    /// A fixed contract on the given cycle with every deduction and allowance disabled.
    pub fn fixed(fixed_rate: i64, pay_cycle: PayCycle) -> Self {
        Self {
            pay_cycle,
            pay_basis: PayBasis::Fixed,
            hourly_rate: 0,
            fixed_rate,
            ..Self::hourly(0, 1)
        }
    }

    /// Returns true for hour-based pay.
    pub fn is_hourly(&self) -> bool {
        self.pay_basis == PayBasis::Hourly
    }
}
