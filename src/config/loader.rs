//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! settings from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{PayrollSettings, SettingsFile};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── settings.yaml   # Working days, hours, OT defaults, backend
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Working hours: {}", loader.settings().working_hours_per_day);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: PayrollSettings,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `settings.yaml` is missing
    /// - The file contains invalid YAML
    /// - A value is out of range (working days outside 1-31, non-positive hours)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let settings_path = path.as_ref().join("settings.yaml");
        let file = Self::load_yaml::<SettingsFile>(&settings_path)?;
        Self::validate(&file.payroll, &settings_path)?;

        tracing::info!(
            path = %settings_path.display(),
            default_working_days = file.payroll.default_working_days,
            working_hours_per_day = %file.payroll.working_hours_per_day,
            "Loaded payroll settings"
        );

        Ok(Self {
            settings: file.payroll,
        })
    }

    /// Wraps already-built settings, e.g. for tests.
    pub fn from_settings(settings: PayrollSettings) -> Self {
        Self { settings }
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

    fn validate(settings: &PayrollSettings, path: &Path) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: message.to_string(),
        };

        if !(1..=31).contains(&settings.default_working_days) {
            return Err(invalid("default_working_days must be between 1 and 31"));
        }
        if settings.working_hours_per_day <= Decimal::ZERO {
            return Err(invalid("working_hours_per_day must be greater than 0"));
        }
        if settings.backend.base_url.trim().is_empty() {
            return Err(invalid("backend.base_url must not be empty"));
        }
        Ok(())
    }

    /// Returns the loaded payroll settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }
}
