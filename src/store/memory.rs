//! In-memory store implementation.
//!
//! Keeps shifts and memberships in maps behind a shared `RwLock`, giving
//! fast, deterministic and isolated storage for tests and local runs.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{MemberRole, Membership, ShiftRecord, Workplace};

use super::{ShiftRepository, WorkplaceDirectory};

/// In-memory implementation of [`ShiftRepository`] and [`WorkplaceDirectory`].
///
/// Clones share the same underlying data.
///
/// # Example
///
/// ```
/// use shift_pay_engine::models::ShiftRecord;
/// use shift_pay_engine::store::{InMemoryStore, ShiftRepository};
/// use chrono::NaiveDate;
///
/// let store = InMemoryStore::new();
/// let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let start = date.and_hms_opt(9, 0, 0).unwrap();
/// store.insert_shift(ShiftRecord::new("s1", "w1", date, start, None, 10_030)).unwrap();
///
/// let shifts = store.shifts_in_range("w1", date, date).unwrap();
/// assert_eq!(shifts.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<StoreData>>,
}

#[derive(Debug, Default)]
struct StoreData {
    shifts: BTreeMap<String, ShiftRecord>,
    memberships: Vec<Membership>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a shift, replacing any stored shift with the same id.
    pub fn insert_shift(&self, shift: ShiftRecord) -> EngineResult<()> {
        self.write()?.shifts.insert(shift.id.clone(), shift);
        Ok(())
    }

    /// Remove a shift, returning it if it was stored.
    pub fn remove_shift(&self, shift_id: &str) -> EngineResult<Option<ShiftRecord>> {
        Ok(self.write()?.shifts.remove(shift_id))
    }

    /// Look up a stored shift by id.
    pub fn shift(&self, shift_id: &str) -> EngineResult<Option<ShiftRecord>> {
        Ok(self.read()?.shifts.get(shift_id).cloned())
    }

    /// Register a membership.
    pub fn add_membership(&self, membership: Membership) -> EngineResult<()> {
        self.write()?.memberships.push(membership);
        Ok(())
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, StoreData>> {
        self.data.read().map_err(|e| EngineError::Storage {
            message: format!("store lock poisoned: {}", e),
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, StoreData>> {
        self.data.write().map_err(|e| EngineError::Storage {
            message: format!("store lock poisoned: {}", e),
        })
    }
}

fn sort_chronologically(shifts: &mut [ShiftRecord]) {
    shifts.sort_by(|a, b| {
        (a.work_date, a.scheduled_start, &a.id).cmp(&(b.work_date, b.scheduled_start, &b.id))
    });
}

impl ShiftRepository for InMemoryStore {
    fn shifts_in_range(
        &self,
        worker_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<ShiftRecord>> {
        self.shifts_for_workers(&[worker_id.to_string()], from, to)
    }

    fn shifts_for_workers(
        &self,
        worker_ids: &[String],
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<ShiftRecord>> {
        let data = self.read()?;
        let mut shifts: Vec<ShiftRecord> = data
            .shifts
            .values()
            .filter(|s| worker_ids.contains(&s.worker_id))
            .filter(|s| s.work_date >= from && s.work_date <= to)
            .cloned()
            .collect();
        sort_chronologically(&mut shifts);
        Ok(shifts)
    }

    fn update_computed_fields(&self, shifts: &[ShiftRecord]) -> EngineResult<()> {
        let mut data = self.write()?;

        // Validate the whole batch before writing any of it
        if let Some(missing) = shifts.iter().find(|s| !data.shifts.contains_key(&s.id)) {
            return Err(EngineError::Storage {
                message: format!("shift '{}' not found", missing.id),
            });
        }

        for shift in shifts {
            if let Some(stored) = data.shifts.get_mut(&shift.id) {
                stored.earnings = shift.earnings;
            }
        }
        Ok(())
    }

    fn reset_estimated_net_income(
        &self,
        worker_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<()> {
        let mut data = self.write()?;
        data.shifts
            .values_mut()
            .filter(|s| s.worker_id == worker_id && s.work_date >= from && s.work_date <= to)
            .for_each(|s| s.earnings.estimated_net_income = 0);
        Ok(())
    }
}

impl WorkplaceDirectory for InMemoryStore {
    fn memberships_of(&self, user_id: &str) -> EngineResult<Vec<Membership>> {
        Ok(self
            .read()?
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    fn workplaces_owned_by(&self, user_id: &str) -> EngineResult<Vec<Workplace>> {
        Ok(self
            .read()?
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id && m.role == MemberRole::Owner)
            .map(|m| m.workplace.clone())
            .collect())
    }

    fn members_of(&self, workplace_id: &str) -> EngineResult<Vec<Membership>> {
        Ok(self
            .read()?
            .memberships
            .iter()
            .filter(|m| m.workplace.id == workplace_id)
            .cloned()
            .collect())
    }
}
