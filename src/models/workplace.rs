//! Workplace and membership models.
//!
//! Memberships link a user to a workplace either as a worker (with an
//! optional salary contract) or as the owner.

use serde::{Deserialize, Serialize};

use super::SalaryConfig;

/// The role a membership grants at a workplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Works shifts and is paid.
    Worker,
    /// Runs the workplace and pays its workers.
    Owner,
}

/// A workplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workplace {
    /// Unique identifier of the workplace.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A user's membership at one workplace.
///
/// For worker memberships `id` is the worker id shifts are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Membership (worker) identifier.
    pub id: String,
    /// The user holding the membership.
    pub user_id: String,
    /// The workplace the membership belongs to.
    pub workplace: Workplace,
    /// Worker or owner.
    pub role: MemberRole,
    /// Name shown to the owner.
    pub nickname: String,
    /// The pay contract, once the owner has configured one.
    #[serde(default)]
    pub salary: Option<SalaryConfig>,
}

impl Membership {
    /// Returns true for a worker membership.
    pub fn is_worker(&self) -> bool {
        self.role == MemberRole::Worker
    }
}
