//! Configuration loading and management for the Payroll Engine.
//!
//! This module loads company-wide payroll settings from YAML: default working
//! days, working hours per day, overtime defaults and the admin backend
//! connection.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Backend: {}", config.settings().backend.base_url);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BackendConfig, OvertimeSettings, PayrollSettings};
