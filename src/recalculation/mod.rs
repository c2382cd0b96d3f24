//! Write-triggered recalculation.
//!
//! Creating, editing or deleting a shift invalidates the holiday allowance
//! of every shift in its ISO week and the net income estimates of its month.
//! Callers turn each write into a [`RecalculationCommand`], optionally
//! [`coalesce`] a batch of them, and run each through a [`Recalculator`].

mod command;
mod recalculator;

pub use command::{RecalculationCommand, RecalculationKey, RecalculationScope, coalesce};
pub use recalculator::{RecalculationReport, Recalculator};
