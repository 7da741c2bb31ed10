//! Configuration types for payroll settings.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::DEFAULT_WORKING_DAYS;
use crate::models::{OtType, OvertimePolicy};

fn default_working_days() -> u32 {
    DEFAULT_WORKING_DAYS
}

fn default_working_hours() -> Decimal {
    Decimal::from(8)
}

fn default_fixed_rate() -> Decimal {
    Decimal::from(150)
}

fn default_multiplier() -> Decimal {
    Decimal::new(15, 1)
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

/// Company-wide overtime defaults.
///
/// Used for employees that have no salary structure saved yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSettings {
    /// The default OT type.
    #[serde(default)]
    pub ot_type: OtType,
    /// Fixed rate per overtime hour.
    #[serde(default = "default_fixed_rate")]
    pub fixed_rate: Decimal,
    /// Multiple of the hourly wage.
    #[serde(default = "default_multiplier")]
    pub multiplier: Decimal,
}

impl Default for OvertimeSettings {
    fn default() -> Self {
        Self {
            ot_type: OtType::Fixed,
            fixed_rate: default_fixed_rate(),
            multiplier: default_multiplier(),
        }
    }
}

impl OvertimeSettings {
    /// Returns the default overtime policy these settings describe.
    pub fn default_policy(&self) -> OvertimePolicy {
        match self.ot_type {
            OtType::Fixed => OvertimePolicy::Fixed {
                rate_per_hour: Some(self.fixed_rate),
            },
            OtType::Multiplier => OvertimePolicy::Multiplier {
                multiplier: Some(self.multiplier),
            },
        }
    }
}

/// Connection settings for the admin REST backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL that endpoint paths are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds; the HTTP client default when absent.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

/// Company payroll settings, loaded from `settings.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// Working days used when a month's calendar is unavailable.
    #[serde(default = "default_working_days")]
    pub default_working_days: u32,
    /// Working hours in a day, used to derive the hourly wage.
    #[serde(default = "default_working_hours")]
    pub working_hours_per_day: Decimal,
    /// Overtime defaults.
    #[serde(default)]
    pub overtime: OvertimeSettings,
    /// Backend connection.
    #[serde(default)]
    pub backend: BackendConfig,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            default_working_days: default_working_days(),
            working_hours_per_day: default_working_hours(),
            overtime: OvertimeSettings::default(),
            backend: BackendConfig::default(),
        }
    }
}

/// Settings configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsFile {
    /// The payroll settings section.
    pub payroll: PayrollSettings,
}
