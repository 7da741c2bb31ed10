//! Company-wide overtime and working-time settings kept by the backend.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::DEFAULT_WORKING_DAYS;
use crate::config::PayrollSettings;
use crate::error::{EngineError, EngineResult};

use super::money::{lenient_count, lenient_decimal, lenient_decimal_opt};
use super::salary_structure::{OtType, OvertimePolicy};

fn default_working_days() -> u32 {
    DEFAULT_WORKING_DAYS
}

fn default_working_hours() -> Decimal {
    Decimal::from(8)
}

/// The `settings` record behind the OT settings screen.
///
/// `sunday_multiplier` is stored and sent back unchanged; no calculation
/// reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySettings {
    /// Default OT type for employees without a salary structure.
    #[serde(default)]
    pub ot_type: OtType,
    /// Rate per OT hour when the type is FIXED.
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub fixed_ot_rate: Option<Decimal>,
    /// Multiple of the hourly wage when the type is MULTIPLIER.
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub ot_multiplier: Option<Decimal>,
    /// Sunday multiplier as stored by the backend.
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub sunday_multiplier: Option<Decimal>,
    /// Working days in a month.
    #[serde(default = "default_working_days", deserialize_with = "lenient_count")]
    pub working_days: u32,
    /// Working hours in a day.
    #[serde(default = "default_working_hours", deserialize_with = "lenient_decimal")]
    pub working_hours: Decimal,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self::from(&PayrollSettings::default())
    }
}

impl From<&PayrollSettings> for CompanySettings {
    fn from(settings: &PayrollSettings) -> Self {
        Self {
            ot_type: settings.overtime.ot_type,
            fixed_ot_rate: Some(settings.overtime.fixed_rate),
            ot_multiplier: Some(settings.overtime.multiplier),
            sunday_multiplier: None,
            working_days: settings.default_working_days,
            working_hours: settings.working_hours_per_day,
        }
        .normalized()
    }
}

impl CompanySettings {
    /// Returns the overtime policy these settings describe.
    pub fn policy(&self) -> OvertimePolicy {
        match self.ot_type {
            OtType::Fixed => OvertimePolicy::Fixed {
                rate_per_hour: self.fixed_ot_rate,
            },
            OtType::Multiplier => OvertimePolicy::Multiplier {
                multiplier: self.ot_multiplier,
            },
        }
    }

    /// Clears the OT parameter that does not belong to the OT type.
    pub fn normalized(mut self) -> Self {
        match self.ot_type {
            OtType::Fixed => self.ot_multiplier = None,
            OtType::Multiplier => self.fixed_ot_rate = None,
        }
        self
    }

    /// Checks the values before they are saved and returns them normalized.
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the first field out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{CompanySettings, OtType};
    /// use rust_decimal::Decimal;
    ///
    /// let settings = CompanySettings {
    ///     ot_type: OtType::Multiplier,
    ///     ot_multiplier: Some(Decimal::new(15, 1)),
    ///     ..CompanySettings::default()
    /// };
    /// let saved = settings.validate().unwrap();
    /// assert_eq!(saved.fixed_ot_rate, None);
    /// ```
    pub fn validate(self) -> EngineResult<Self> {
        if !(1..=31).contains(&self.working_days) {
            return Err(EngineError::validation(
                "workingDays",
                "Working days must be between 1 and 31",
            ));
        }
        if self.working_hours <= Decimal::ZERO || self.working_hours > Decimal::from(24) {
            return Err(EngineError::validation(
                "workingHours",
                "Working hours must be between 0 and 24",
            ));
        }
        match self.ot_type {
            OtType::Fixed => match self.fixed_ot_rate {
                Some(rate) if rate >= Decimal::ZERO => {}
                _ => {
                    return Err(EngineError::validation(
                        "fixedOtRate",
                        "Fixed OT rate is required",
                    ));
                }
            },
            OtType::Multiplier => match self.ot_multiplier {
                Some(multiplier) if multiplier > Decimal::ZERO => {}
                _ => {
                    return Err(EngineError::validation(
                        "otMultiplier",
                        "OT multiplier must be greater than 0",
                    ));
                }
            },
        }
        Ok(self.normalized())
    }

    /// Returns `base` with the working time and OT defaults replaced by
    /// these settings. Backend connection settings are kept.
    pub fn apply_to(&self, base: &PayrollSettings) -> PayrollSettings {
        let mut settings = base.clone();
        settings.default_working_days = self.working_days;
        settings.working_hours_per_day = self.working_hours;
        settings.overtime.ot_type = self.ot_type;
        if let Some(rate) = self.fixed_ot_rate {
            settings.overtime.fixed_rate = rate;
        }
        if let Some(multiplier) = self.ot_multiplier {
            settings.overtime.multiplier = multiplier;
        }
        settings
    }
}
