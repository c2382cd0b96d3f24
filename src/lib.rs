//! Shift Pay Engine for hourly shift work
//!
//! This crate computes pay for shift workers: per-shift earnings with the
//! night premium and weekly holiday allowance, monthly take-home estimates
//! for calendar display, statutory deduction projections, and monthly
//! summaries for workers and workplace owners.
//!
//! Storage stays outside the crate behind the [`store`] traits; the
//! [`recalculation`] module drives the pure [`calculation`] functions over
//! them whenever a shift is written.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod recalculation;
pub mod store;
pub mod summary;
