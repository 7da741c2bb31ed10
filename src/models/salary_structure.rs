//! Salary structure models.
//!
//! A salary structure splits an employee's monthly salary into basic pay,
//! HRA and allowance, and records how their overtime is paid.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::employee::DepartmentRef;
use super::money::{lenient_decimal, lenient_decimal_opt};

/// How overtime is priced for an employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OtType {
    /// A fixed amount per overtime hour.
    #[default]
    Fixed,
    /// A multiple of the employee's derived hourly wage.
    Multiplier,
}

/// The overtime rule resolved from an [`OtType`] and its parameter.
///
/// Only the parameter relevant to the type is carried, so a FIXED policy
/// can never accidentally read a multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "otType", rename_all = "UPPERCASE")]
pub enum OvertimePolicy {
    /// Pay `rate_per_hour` for each overtime hour. Missing means 0.
    Fixed {
        /// Amount per overtime hour.
        #[serde(
            rename = "otRatePerHour",
            default,
            deserialize_with = "lenient_decimal_opt"
        )]
        rate_per_hour: Option<Decimal>,
    },
    /// Pay hourly wage times `multiplier`. Missing means 1.
    Multiplier {
        /// Multiple of the hourly wage.
        #[serde(
            rename = "otMultiplier",
            default,
            deserialize_with = "lenient_decimal_opt"
        )]
        multiplier: Option<Decimal>,
    },
}

impl OvertimePolicy {
    /// Returns the [`OtType`] of this policy.
    pub fn ot_type(&self) -> OtType {
        match self {
            OvertimePolicy::Fixed { .. } => OtType::Fixed,
            OvertimePolicy::Multiplier { .. } => OtType::Multiplier,
        }
    }
}

/// An employee's salary structure.
///
/// When serialized for saving, the rate field that does not belong to the
/// OT type is written as `null` (see [`SalaryStructure::normalized`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryStructure {
    /// The employee this structure belongs to.
    pub employee_id: String,
    /// Monthly salary.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub monthly_salary: Decimal,
    /// Basic pay component.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub basic_pay: Decimal,
    /// House rent allowance component.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub hra: Decimal,
    /// Other allowance component.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub allowance: Decimal,
    /// How overtime is priced.
    #[serde(default)]
    pub ot_type: OtType,
    /// Fixed overtime rate per hour (FIXED only).
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub ot_rate_per_hour: Option<Decimal>,
    /// Overtime multiplier (MULTIPLIER only).
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub ot_multiplier: Option<Decimal>,
}

impl SalaryStructure {
    /// Returns the overtime policy this structure describes.
    pub fn policy(&self) -> OvertimePolicy {
        match self.ot_type {
            OtType::Fixed => OvertimePolicy::Fixed {
                rate_per_hour: self.ot_rate_per_hour,
            },
            OtType::Multiplier => OvertimePolicy::Multiplier {
                multiplier: self.ot_multiplier,
            },
        }
    }

    /// Clears the rate field that does not apply to the OT type.
    ///
    /// ```
    /// use payroll_engine::models::{OtType, SalaryStructure};
    /// use rust_decimal::Decimal;
    ///
    /// let structure = SalaryStructure {
    ///     employee_id: "emp_001".to_string(),
    ///     monthly_salary: Decimal::from(26000),
    ///     basic_pay: Decimal::from(13000),
    ///     hra: Decimal::from(6500),
    ///     allowance: Decimal::from(6500),
    ///     ot_type: OtType::Fixed,
    ///     ot_rate_per_hour: Some(Decimal::from(150)),
    ///     ot_multiplier: Some(Decimal::new(15, 1)),
    /// }
    /// .normalized();
    /// assert_eq!(structure.ot_multiplier, None);
    /// ```
    pub fn normalized(self) -> Self {
        match self.ot_type {
            OtType::Fixed => Self {
                ot_multiplier: None,
                ..self
            },
            OtType::Multiplier => Self {
                ot_rate_per_hour: None,
                ..self
            },
        }
    }
}

/// Request body for `PUT salary-structure/bulk`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryStructureBulkSave {
    /// Structures to save, one per employee.
    pub salary_structures: Vec<SalaryStructure>,
}

impl SalaryStructureBulkSave {
    /// Builds a bulk save with every row normalized.
    pub fn new(structures: impl IntoIterator<Item = SalaryStructure>) -> Self {
        Self {
            salary_structures: structures
                .into_iter()
                .map(SalaryStructure::normalized)
                .collect(),
        }
    }
}

/// The salary structure nested inside an employee on `GET salary-structure`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSalaryStructure {
    /// Monthly salary, if a structure was saved.
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub monthly_salary: Option<Decimal>,
    /// Basic pay component.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub basic_pay: Decimal,
    /// House rent allowance component.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub hra: Decimal,
    /// Other allowance component.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub allowance: Decimal,
    /// How overtime is priced.
    #[serde(default)]
    pub ot_type: OtType,
    /// Fixed overtime rate per hour.
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub ot_rate_per_hour: Option<Decimal>,
    /// Overtime multiplier.
    #[serde(default, deserialize_with = "lenient_decimal_opt")]
    pub ot_multiplier: Option<Decimal>,
}

/// An employee row returned by `GET salary-structure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryStructureEmployee {
    /// Employee ID.
    pub id: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Department, if any.
    #[serde(default)]
    pub department: Option<DepartmentRef>,
    /// Monthly salary recorded on the employee.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub salary: Decimal,
    /// The saved structure, if one exists.
    #[serde(default)]
    pub salary_structure: Option<StoredSalaryStructure>,
}

impl SalaryStructureEmployee {
    /// Flattens the row into an editable [`SalaryStructure`].
    ///
    /// Without a saved structure the monthly salary falls back to the
    /// employee's salary and OT defaults to FIXED.
    pub fn to_structure(&self) -> SalaryStructure {
        let stored = self.salary_structure.clone().unwrap_or_default();
        SalaryStructure {
            employee_id: self.id.clone(),
            monthly_salary: stored.monthly_salary.unwrap_or(self.salary),
            basic_pay: stored.basic_pay,
            hra: stored.hra,
            allowance: stored.allowance,
            ot_type: stored.ot_type,
            ot_rate_per_hour: stored.ot_rate_per_hour,
            ot_multiplier: stored.ot_multiplier,
        }
    }

    /// Returns "First Last" with surrounding whitespace removed.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name,
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}
