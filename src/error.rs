//! Error types for the shift pay engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can surface while loading rates, reading
//! shift records or assembling summaries.

use thiserror::Error;

/// The main error type for the shift pay engine.
///
/// The calculators themselves are total functions; errors come from
/// configuration loading, the repository collaborators and the summary
/// dispatch boundary.
///
/// # Example
///
/// ```
/// use shift_pay_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rates.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rates.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or holds invalid values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A shift record was inconsistent with the operation requested.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// The requested calendar month does not exist.
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month (1-12).
        month: u32,
    },

    /// The viewer role cannot request a monthly summary.
    #[error("Unsupported viewer for monthly summary: {viewer}")]
    UnsupportedViewer {
        /// The role that reached the summary boundary.
        viewer: String,
    },

    /// A repository collaborator failed to read or write records.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
