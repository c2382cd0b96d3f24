//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the deduction
//! rate table from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::RateTable;

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── rates.yaml   # Statutory deduction rates and insurance threshold
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_pay_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Insurance applies from {}h", loader.rates().insurance_min_hours);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rates: RateTable,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `rates.yaml` is missing
    /// - the file contains invalid YAML or a missing field
    /// - a rate lies outside `[0, 1)`
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let rates_path = path.as_ref().join("rates.yaml");
        let rates = Self::load_yaml::<RateTable>(&rates_path)?;

        if let Some(name) = rates.first_invalid_rate() {
            return Err(EngineError::ConfigParseError {
                path: rates_path.display().to_string(),
                message: format!("rate '{}' must be in [0, 1)", name),
            });
        }

        Ok(Self { rates })
    }

    /// Creates a loader around an already-built rate table.
    pub fn from_rates(rates: RateTable) -> Self {
        Self { rates }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded rate table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }
}
