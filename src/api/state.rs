//! Application state for the Shift Pay Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, RateTable};

/// Shared application state.
///
/// Holds the rate table loaded once at start-up; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    /// The loaded rate configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the deduction rate table.
    pub fn rates(&self) -> &RateTable {
        self.config.rates()
    }
}
