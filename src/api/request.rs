//! Request types for the Payroll Engine API.
//!
//! This module defines the JSON request structures for the `/calculate/*`
//! endpoints. Money fields accept numbers or numeric strings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::PayrollItemInput;
use crate::config::OvertimeSettings;
use crate::models::{
    AdjustmentLine, Holiday, OtType, OvertimePolicy, iso_date_opt, lenient_decimal,
    lenient_decimal_opt,
};

/// Request body for `POST /calculate/eligible-days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibleDaysRequest {
    /// The employee's hire date; absent means hired before the month.
    #[serde(default, with = "iso_date_opt")]
    pub hire_date: Option<NaiveDate>,
    /// Month (1-12).
    pub month: u32,
    /// Four-digit year.
    pub year: i32,
    /// Working days in the month.
    pub working_days: u32,
}

/// Request body for `POST /calculate/salary-breakup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBreakupRequest {
    /// Basic pay component.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub basic_pay: Decimal,
    /// House rent allowance component.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub hra: Decimal,
    /// Other allowance component.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub allowance: Decimal,
    /// The monthly salary the components should add up to.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub monthly_salary: Decimal,
}

/// Request body for `POST /calculate/overtime-rate`.
///
/// Without an `otType` the configured company default applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeRateRequest {
    /// Monthly salary.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub monthly_salary: Decimal,
    /// Working days in the month.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub working_days: Decimal,
    /// Working hours per day; the configured value when absent.
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub working_hours_per_day: Option<Decimal>,
    /// How overtime is priced.
    #[serde(default)]
    pub ot_type: Option<OtType>,
    /// Fixed rate per hour (FIXED).
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub ot_rate_per_hour: Option<Decimal>,
    /// Multiple of the hourly wage (MULTIPLIER).
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub ot_multiplier: Option<Decimal>,
}

impl OvertimeRateRequest {
    /// Resolves the policy from the request, falling back to the defaults.
    pub fn policy(&self, defaults: &OvertimeSettings) -> OvertimePolicy {
        match self.ot_type {
            Some(OtType::Fixed) => OvertimePolicy::Fixed {
                rate_per_hour: self.ot_rate_per_hour,
            },
            Some(OtType::Multiplier) => OvertimePolicy::Multiplier {
                multiplier: self.ot_multiplier,
            },
            None => defaults.default_policy(),
        }
    }
}

/// Request body for `POST /calculate/adjustments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentsRequest {
    /// The adjustments to aggregate.
    #[serde(default)]
    pub adjustments: Vec<AdjustmentLine>,
}

/// Request body for `POST /calculate/working-days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingDaysRequest {
    /// Month (1-12).
    pub month: u32,
    /// Four-digit year.
    pub year: i32,
    /// The holiday calendar; only entries inside the month count.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// Request body for `POST /calculate/payroll`.
///
/// Working days are taken from `workingDays` when given, otherwise derived
/// from `holidays`, otherwise the configured default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRequest {
    /// Month (1-12).
    pub month: u32,
    /// Four-digit year.
    pub year: i32,
    /// Explicit working days for the month.
    #[serde(default)]
    pub working_days: Option<u32>,
    /// Holiday calendar used to derive working days.
    #[serde(default)]
    pub holidays: Option<Vec<Holiday>>,
    /// One entry per employee.
    pub employees: Vec<PayrollItemInput>,
}
