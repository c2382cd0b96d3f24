//! Storage collaborators for the shift pay engine.
//!
//! The engine never owns persistence. It reads shifts and memberships and
//! writes computed fields back through the traits in this module; callers
//! plug in their own database implementation. [`InMemoryStore`] implements
//! every trait for tests, benchmarks and the local server.

mod memory;

pub use memory::InMemoryStore;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{Membership, ShiftRecord, Workplace};

/// Repository trait for shift records.
///
/// Date ranges are inclusive on both ends and filter on `work_date`.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to sit behind shared server state.
pub trait ShiftRepository: Send + Sync {
    /// Fetch one worker's shifts dated within `[from, to]`.
    fn shifts_in_range(
        &self,
        worker_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<ShiftRecord>>;

    /// Fetch the shifts of several workers dated within `[from, to]`.
    fn shifts_for_workers(
        &self,
        worker_ids: &[String],
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<ShiftRecord>>;

    /// Persist the computed fields of a batch of shifts.
    ///
    /// Only `earnings` is written; identity and schedule fields are left as
    /// stored.
    fn update_computed_fields(&self, shifts: &[ShiftRecord]) -> EngineResult<()>;

    /// Zero `estimated_net_income` for one worker's shifts within `[from, to]`.
    fn reset_estimated_net_income(
        &self,
        worker_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<()>;
}

/// Read access to workplaces and their memberships.
pub trait WorkplaceDirectory: Send + Sync {
    /// All memberships held by a user, across workplaces.
    fn memberships_of(&self, user_id: &str) -> EngineResult<Vec<Membership>>;

    /// Workplaces where the user holds the owner membership.
    fn workplaces_owned_by(&self, user_id: &str) -> EngineResult<Vec<Workplace>>;

    /// Every membership at a workplace.
    fn members_of(&self, workplace_id: &str) -> EngineResult<Vec<Membership>>;
}
