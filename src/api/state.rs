//! Application state for the Payroll Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the loaded payroll settings, shared read-only across handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayrollSettings;

    #[test]
    fn test_clones_share_settings() {
        let state = AppState::new(ConfigLoader::from_settings(PayrollSettings::default()));
        let clone = state.clone();
        assert!(std::ptr::eq(state.config(), clone.config()));
        assert_eq!(clone.config().settings().default_working_days, 26);
    }
}
