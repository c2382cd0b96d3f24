//! Configuration types for deduction calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Statutory deduction rates and thresholds.
///
/// Loaded once at start-up and passed by reference into every deduction
/// call. All rates are fractions of their base (e.g. `0.045` for 4.5%).
///
/// # Example
///
/// ```
/// use shift_pay_engine::config::RateTable;
/// use rust_decimal::Decimal;
///
/// let rates = RateTable::default();
/// assert_eq!(rates.insurance_min_hours, 60);
/// assert!(rates.national_pension > Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// National pension rate, applied to gross income.
    pub national_pension: Decimal,
    /// Health insurance rate, applied to gross income.
    pub health_insurance: Decimal,
    /// Long-term care rate, applied to the health insurance premium.
    pub long_term_care: Decimal,
    /// Employment insurance rate, applied to gross income.
    pub employment_insurance: Decimal,
    /// Income tax rate, applied to gross income.
    pub income_tax: Decimal,
    /// Monthly worked hours at which social insurance becomes applicable.
    pub insurance_min_hours: u32,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            national_pension: Decimal::new(45, 3),
            health_insurance: Decimal::new(3545, 5),
            long_term_care: Decimal::new(1295, 4),
            employment_insurance: Decimal::new(9, 3),
            income_tax: Decimal::new(3, 2),
            insurance_min_hours: 60,
        }
    }
}

impl RateTable {
    /// Returns the name of the first rate outside `[0, 1)`, if any.
    pub(crate) fn first_invalid_rate(&self) -> Option<&'static str> {
        [
            ("national_pension", self.national_pension),
            ("health_insurance", self.health_insurance),
            ("long_term_care", self.long_term_care),
            ("employment_insurance", self.employment_insurance),
            ("income_tax", self.income_tax),
        ]
        .into_iter()
        .find(|(_, rate)| rate.is_sign_negative() || *rate >= Decimal::ONE)
        .map(|(name, _)| name)
    }
}
