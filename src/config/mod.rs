//! Configuration loading and management for the shift pay engine.
//!
//! The only process-wide configuration is the statutory [`RateTable`]. It is
//! loaded once at start-up and then handed to every calculator call
//! explicitly; nothing in the engine reads it from global state.
//!
//! # Example
//!
//! ```no_run
//! use shift_pay_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Income tax rate: {}", config.rates().income_tax);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::RateTable;
