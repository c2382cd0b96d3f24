//! Statutory deduction calculation.
//!
//! Social insurance (national pension, health insurance with its long-term
//! care surcharge, employment insurance) applies only once the worker earns
//! or works enough in the month; income tax is independent of that test.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::RateTable;
use crate::models::{DeductionResult, SalaryConfig};

/// Monthly gross income at which social insurance applies regardless of hours.
pub const INSURANCE_INCOME_THRESHOLD: i64 = 2_200_000;

/// Local income tax as a fraction of income tax.
pub fn local_income_tax_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// Returns true when social insurance applies to the period.
pub fn insurance_applicable(gross_income: i64, total_work_hours: Decimal, rates: &RateTable) -> bool {
    gross_income >= INSURANCE_INCOME_THRESHOLD
        || total_work_hours >= Decimal::from(rates.insurance_min_hours)
}

/// Computes the deductions on a gross amount.
///
/// Each amount is `floor(base × rate)` and only withheld when its flag on the
/// salary contract is set. The long-term care surcharge is computed on the
/// health insurance premium. Local income tax follows any positive income
/// tax. `net_income` is not floored at zero.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::calculate_deductions;
/// use shift_pay_engine::config::RateTable;
/// use shift_pay_engine::models::SalaryConfig;
/// use rust_decimal::Decimal;
///
/// let mut salary = SalaryConfig::hourly(10_030, 10);
/// salary.has_income_tax = true;
///
/// let result = calculate_deductions(100_000, Decimal::ZERO, &salary, &RateTable::default());
/// assert_eq!(result.income_tax, 3_000);
/// assert_eq!(result.local_income_tax, 300);
/// assert_eq!(result.net_income, 96_700);
/// ```
pub fn calculate_deductions(
    gross_income: i64,
    total_work_hours: Decimal,
    salary: &SalaryConfig,
    rates: &RateTable,
) -> DeductionResult {
    let gross = Decimal::from(gross_income);

    let (national_pension, health_insurance, employment_insurance) =
        if insurance_applicable(gross_income, total_work_hours, rates) {
            let pension = if salary.has_national_pension {
                floor_to_won(gross * rates.national_pension)
            } else {
                0
            };
            let health = if salary.has_health_insurance {
                let base = floor_to_won(gross * rates.health_insurance);
                base + floor_to_won(Decimal::from(base) * rates.long_term_care)
            } else {
                0
            };
            let employment = if salary.has_employment_insurance {
                floor_to_won(gross * rates.employment_insurance)
            } else {
                0
            };
            (pension, health, employment)
        } else {
            (0, 0, 0)
        };

    let income_tax = if salary.has_income_tax {
        floor_to_won(gross * rates.income_tax)
    } else {
        0
    };
    let local_income_tax = if income_tax > 0 {
        floor_to_won(Decimal::from(income_tax) * local_income_tax_rate())
    } else {
        0
    };

    let total_deductions =
        national_pension + health_insurance + employment_insurance + income_tax + local_income_tax;

    DeductionResult {
        national_pension,
        health_insurance,
        employment_insurance,
        income_tax,
        local_income_tax,
        total_deductions,
        net_income: gross_income - total_deductions,
    }
}

/// Converts minutes to fractional hours.
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(60)
}

fn floor_to_won(amount: Decimal) -> i64 {
    amount.floor().to_i64().unwrap_or_default()
}
