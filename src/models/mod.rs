//! Core data models for the shift pay engine.
//!
//! This module contains all the domain models used throughout the engine.

mod deduction;
mod salary;
mod shift;
mod summary;
mod workplace;

pub use deduction::DeductionResult;
pub use salary::{PayBasis, PayCycle, SalaryConfig};
pub use shift::{ShiftEarnings, ShiftRecord};
pub use summary::{
    MonthlySummary, OwnerMonthlySummary, OwnerWorkplaceSummary, WorkerMonthlySummary,
    WorkerPayLine, WorkplaceEarnings,
};
pub use workplace::{MemberRole, Membership, Workplace};
