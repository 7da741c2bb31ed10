//! Employee model and reference lookups.
//!
//! This module defines the [`Employee`] record together with the
//! [`Department`] and [`Role`] lookups it points at.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::dates::iso_date_opt;
use super::money::lenient_decimal;

/// Lifecycle status shared by employees, departments and roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityStatus {
    /// The record is in use.
    #[default]
    Active,
    /// The record is retained but hidden from new assignments.
    Inactive,
}

impl EntityStatus {
    /// Returns the opposite status, as used by the status toggle.
    ///
    /// ```
    /// use payroll_engine::models::EntityStatus;
    ///
    /// assert_eq!(EntityStatus::Active.toggled(), EntityStatus::Inactive);
    /// assert_eq!(EntityStatus::Inactive.toggled(), EntityStatus::Active);
    /// ```
    pub fn toggled(self) -> Self {
        match self {
            EntityStatus::Active => EntityStatus::Inactive,
            EntityStatus::Inactive => EntityStatus::Active,
        }
    }
}

/// A department an employee can belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier for the department.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the department is active.
    #[serde(default)]
    pub status: EntityStatus,
}

/// A job role an employee can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier for the role.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Whether the role is active.
    #[serde(default)]
    pub status: EntityStatus,
}

/// Request body for creating or renaming a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDepartment {
    /// The department name.
    pub name: String,
}

impl NewDepartment {
    /// Trims the name and rejects blanks.
    pub fn validate(self) -> EngineResult<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(EngineError::validation("name", "Department name required"));
        }
        Ok(Self { name })
    }
}

/// Request body for creating or renaming a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
    /// The role title.
    pub title: String,
}

impl NewRole {
    /// Trims the title and rejects blanks.
    pub fn validate(self) -> EngineResult<Self> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(EngineError::validation("title", "Role title required"));
        }
        Ok(Self { title })
    }
}

/// Employment contract type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EmploymentType {
    /// Fixed-term contract.
    #[default]
    Contract,
    /// Permanent staff.
    Permanent,
}

/// How often an employee is paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentType {
    /// Paid once a month.
    #[default]
    Monthly,
    /// Paid every week.
    Weekly,
    /// Paid every day.
    Daily,
}

/// Request body for creating or editing an employee.
///
/// Required: first name, email, phone, and a password when creating.
/// Blank optional fields are sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    /// Given name.
    pub first_name: String,
    /// Contact email.
    pub email: String,
    /// Ten-digit mobile number.
    pub phone: String,
    /// Login password; only sent when creating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Department the employee belongs to.
    #[serde(default)]
    pub department_id: Option<String>,
    /// Role the employee holds.
    #[serde(default)]
    pub role_id: Option<String>,
    /// Monthly salary.
    #[serde(default)]
    pub salary: Option<Decimal>,
    /// National ID number.
    #[serde(default)]
    pub aadhaar: Option<String>,
    /// Years of experience.
    #[serde(default)]
    pub experience: Option<Decimal>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Contract type.
    #[serde(default, rename = "type")]
    pub employment_type: EmploymentType,
    /// Pay frequency.
    #[serde(default)]
    pub payment_type: PaymentType,
    /// Date of birth.
    #[serde(default, with = "iso_date_opt")]
    pub date_of_birth: Option<NaiveDate>,
    /// Date the employee joined.
    #[serde(default, with = "iso_date_opt")]
    pub hire_date: Option<NaiveDate>,
}

impl EmployeeInput {
    /// Validates a new employee. A password is required.
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the first missing or malformed field.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::EmployeeInput;
    ///
    /// let input = EmployeeInput {
    ///     first_name: "Asha".to_string(),
    ///     email: "asha@example.com".to_string(),
    ///     phone: "9876543210".to_string(),
    ///     ..EmployeeInput::default()
    /// };
    /// assert!(input.clone().validate_new().is_err());
    /// assert!(input.validate_update().is_ok());
    /// ```
    pub fn validate_new(self) -> EngineResult<Self> {
        const REQUIRED: &str = "First name, email, phone number and password are required";
        let mut input = self.normalized(REQUIRED)?;
        input.password = match input.password.filter(|p| !p.is_empty()) {
            Some(password) => Some(password),
            None => return Err(EngineError::validation("password", REQUIRED)),
        };
        Ok(input)
    }

    /// Validates an edit. Any password is dropped; it has its own endpoint.
    pub fn validate_update(self) -> EngineResult<Self> {
        let mut input = self.normalized("First name, email and phone are required")?;
        input.password = None;
        Ok(input)
    }

    fn normalized(self, required: &str) -> EngineResult<Self> {
        let first_name = self.first_name.trim().to_string();
        let email = self.email.trim().to_string();
        let phone = self.phone.trim().to_string();
        for (field, value) in [("firstName", &first_name), ("email", &email), ("phone", &phone)] {
            if value.is_empty() {
                return Err(EngineError::validation(field, required));
            }
        }
        if !is_mobile_number(&phone) {
            return Err(EngineError::validation(
                "phone",
                "Enter a valid 10-digit mobile number",
            ));
        }

        Ok(Self {
            first_name,
            email,
            phone,
            department_id: non_blank(self.department_id),
            role_id: non_blank(self.role_id),
            aadhaar: non_blank(self.aadhaar),
            address: non_blank(self.address),
            ..self
        })
    }
}

/// Ten digits, starting with 6 to 9.
fn is_mobile_number(phone: &str) -> bool {
    phone.len() == 10
        && phone.chars().all(|c| c.is_ascii_digit())
        && matches!(phone.chars().next(), Some('6'..='9'))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Request body for `PUT employees/:id/password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordReset {
    /// The new password.
    pub password: String,
}

impl PasswordReset {
    /// Checks the new password against its confirmation.
    pub fn new(password: &str, confirmation: &str) -> EngineResult<Self> {
        if password.is_empty() || confirmation.is_empty() {
            return Err(EngineError::validation("password", "Password is required"));
        }
        if password.chars().count() < 6 {
            return Err(EngineError::validation(
                "password",
                "Password must be at least 6 characters",
            ));
        }
        if password != confirmation {
            return Err(EngineError::validation(
                "confirmPassword",
                "Passwords do not match",
            ));
        }
        Ok(Self {
            password: password.to_string(),
        })
    }
}

/// A department reference embedded in employee payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRef {
    /// Department ID, when the backend includes it.
    #[serde(default)]
    pub id: Option<String>,
    /// Department name.
    pub name: String,
}

/// A role reference embedded in employee payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    /// Role ID, when the backend includes it.
    #[serde(default)]
    pub id: Option<String>,
    /// Role title.
    pub title: String,
}

/// Represents an employee on the payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name, if recorded.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// The employee's department.
    #[serde(default)]
    pub department: Option<DepartmentRef>,
    /// The employee's role.
    #[serde(default)]
    pub role: Option<RoleRef>,
    /// The date the employee joined. Drives pro-rating in the hire month.
    #[serde(default, with = "iso_date_opt")]
    pub hire_date: Option<NaiveDate>,
    /// The monthly salary recorded on the employee.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub salary: Decimal,
    /// Whether the employee is active.
    #[serde(default)]
    pub status: EntityStatus,
}

impl Employee {
    /// Returns "First Last" with surrounding whitespace removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{EntityStatus, Employee};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     first_name: "Asha".to_string(),
    ///     last_name: None,
    ///     email: "asha@example.com".to_string(),
    ///     phone: None,
    ///     department: None,
    ///     role: None,
    ///     hire_date: None,
    ///     salary: Decimal::from(26000),
    ///     status: EntityStatus::Active,
    /// };
    /// assert_eq!(employee.full_name(), "Asha");
    /// ```
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name,
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }

    /// Returns true if the employee is active.
    pub fn is_active(&self) -> bool {
        self.status == EntityStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_employee() {
        let json = r#"{
            "id": "emp_001",
            "firstName": "Asha",
            "lastName": "Rao",
            "email": "asha@example.com",
            "phone": "9876543210",
            "department": {"id": "dep_1", "name": "Engineering"},
            "role": {"title": "Developer"},
            "hireDate": "2025-03-15T00:00:00.000Z",
            "salary": "26000",
            "status": "ACTIVE"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.full_name(), "Asha Rao");
        assert_eq!(employee.salary, Decimal::from(26000));
        assert_eq!(
            employee.hire_date,
            Some(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())
        );
        assert_eq!(employee.department.as_ref().unwrap().name, "Engineering");
        assert_eq!(employee.role.as_ref().unwrap().id, None);
        assert!(employee.is_active());
    }

    #[test]
    fn test_deserialize_minimal_employee_defaults() {
        let json = r#"{"id": "emp_002", "firstName": "Ravi", "email": "ravi@example.com"}"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.salary, Decimal::ZERO);
        assert_eq!(employee.status, EntityStatus::Active);
        assert_eq!(employee.hire_date, None);
    }

    #[test]
    fn test_garbage_salary_coerces_to_zero() {
        let json = r#"{"id": "emp_003", "firstName": "X", "email": "x@example.com", "salary": "n/a"}"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.salary, Decimal::ZERO);
    }

    #[test]
    fn test_full_name_trims_missing_last_name() {
        let json = r#"{"id": "e", "firstName": "Meera", "lastName": "", "email": "m@example.com"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.full_name(), "Meera");
    }

    #[test]
    fn test_entity_status_serialization() {
        assert_eq!(
            serde_json::to_string(&EntityStatus::Active).unwrap(),
            "\"ACTIVE\""
        );
        assert_eq!(
            serde_json::to_string(&EntityStatus::Inactive).unwrap(),
            "\"INACTIVE\""
        );
    }

    fn employee_input() -> EmployeeInput {
        EmployeeInput {
            first_name: " Asha ".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            password: Some("secret1".to_string()),
            department_id: Some("".to_string()),
            role_id: Some("role_1".to_string()),
            salary: Some(Decimal::from(26000)),
            hire_date: NaiveDate::from_ymd_opt(2026, 1, 15),
            ..EmployeeInput::default()
        }
    }

    /// EM-001: creating an employee requires name, email, phone and password
    #[test]
    fn test_new_employee_required_fields() {
        let valid = employee_input().validate_new().unwrap();
        assert_eq!(valid.first_name, "Asha");
        assert_eq!(valid.department_id, None);
        assert_eq!(valid.role_id.as_deref(), Some("role_1"));

        for (field, input) in [
            ("firstName", EmployeeInput { first_name: "  ".to_string(), ..employee_input() }),
            ("email", EmployeeInput { email: String::new(), ..employee_input() }),
            ("phone", EmployeeInput { phone: String::new(), ..employee_input() }),
            ("password", EmployeeInput { password: None, ..employee_input() }),
        ] {
            match input.validate_new() {
                Err(EngineError::Validation { field: actual, message }) => {
                    assert_eq!(actual, field);
                    assert_eq!(
                        message,
                        "First name, email, phone number and password are required"
                    );
                }
                other => panic!("Expected Validation error for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_phone_must_be_ten_digit_mobile() {
        for phone in ["5876543210", "98765", "98765432101", "98765o3210"] {
            let result = EmployeeInput {
                phone: phone.to_string(),
                ..employee_input()
            }
            .validate_new();
            assert!(
                matches!(result, Err(EngineError::Validation { ref field, .. }) if field == "phone"),
                "{} should be rejected",
                phone
            );
        }
    }

    #[test]
    fn test_update_drops_password_and_serializes_camel_case() {
        let input = employee_input().validate_update().unwrap();
        assert_eq!(input.password, None);

        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["firstName"], "Asha");
        assert_eq!(json["type"], "CONTRACT");
        assert_eq!(json["paymentType"], "MONTHLY");
        assert_eq!(json["hireDate"], "2026-01-15");
        assert!(json["departmentId"].is_null());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_password_reset_rules() {
        assert_eq!(PasswordReset::new("secret1", "secret1").unwrap().password, "secret1");
        assert!(PasswordReset::new("", "").is_err());
        match PasswordReset::new("abc", "abc") {
            Err(EngineError::Validation { message, .. }) => {
                assert_eq!(message, "Password must be at least 6 characters");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
        match PasswordReset::new("secret1", "secret2") {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "confirmPassword"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_department_rejects_blank_name() {
        let result = NewDepartment {
            name: "   ".to_string(),
        }
        .validate();

        match result {
            Err(EngineError::Validation { field, message }) => {
                assert_eq!(field, "name");
                assert_eq!(message, "Department name required");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_role_trims_title() {
        let role = NewRole {
            title: "  Accountant ".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(role.title, "Accountant");
    }

    #[test]
    fn test_new_role_rejects_blank_title() {
        assert!(NewRole {
            title: String::new()
        }
        .validate()
        .is_err());
    }
}
