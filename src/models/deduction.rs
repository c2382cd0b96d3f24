//! Deduction breakdown model.

use serde::{Deserialize, Serialize};

/// Statutory deductions computed for a gross amount.
///
/// Ephemeral: computed on demand and never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionResult {
    /// National pension contribution.
    pub national_pension: i64,
    /// Health insurance including the long-term care surcharge.
    pub health_insurance: i64,
    /// Employment insurance contribution.
    pub employment_insurance: i64,
    /// Income tax.
    pub income_tax: i64,
    /// Local income tax (10% of income tax).
    pub local_income_tax: i64,
    /// Sum of the five amounts above.
    pub total_deductions: i64,
    /// Gross less total deductions; may be negative.
    pub net_income: i64,
}
