//! Monthly pay summaries.
//!
//! Workers see their gross and net pay per workplace with the days left
//! until payday; owners see the payroll of the workplaces they run. Both
//! views are rebuilt from stored shift fields on every request.

mod aggregator;

pub use aggregator::{SummaryAggregator, Viewer};
