//! Monthly attendance records.
//!
//! Attendance is tracked as present days per employee per month. Rows from
//! the older absent-days variant are still accepted and converted on read
//! through [`AttendanceRecord::present_days`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::dates::iso_date_opt;
use super::money::{lenient_count, lenient_decimal, lenient_decimal_opt};

/// One employee's attendance for a month, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// The employee this row belongs to.
    pub employee_id: String,
    /// Display name of the employee.
    #[serde(default)]
    pub name: String,
    /// Contact email of the employee.
    #[serde(default)]
    pub email: String,
    /// Department name, if any.
    #[serde(default)]
    pub department: Option<String>,
    /// Hire date, used to pro-rate the hire month.
    #[serde(default, with = "iso_date_opt")]
    pub hire_date: Option<NaiveDate>,
    /// Monthly salary on file.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub salary: Decimal,
    /// Days present in the month.
    #[serde(
        default,
        deserialize_with = "lenient_decimal_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub present_days: Option<Decimal>,
    /// Days absent in the month (legacy rows only).
    #[serde(
        default,
        deserialize_with = "lenient_decimal_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub absent_days: Option<Decimal>,
    /// Overtime hours worked in the month.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub ot_hours: Decimal,
}

impl AttendanceRecord {
    /// Returns the payable present days, clamped to `[0, eligible]`.
    ///
    /// Present days win when both fields are set. A legacy row with only
    /// absent days becomes `eligible - clamp(absent, 0, eligible)`. A row
    /// with neither counts as fully present.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::AttendanceRecord;
    /// use rust_decimal::Decimal;
    ///
    /// let legacy: AttendanceRecord = serde_json::from_str(
    ///     r#"{"employeeId": "emp_001", "absentDays": 4, "otHours": 0}"#,
    /// ).unwrap();
    /// assert_eq!(legacy.present_days(26), Decimal::from(22));
    /// ```
    pub fn present_days(&self, eligible: u32) -> Decimal {
        let eligible = Decimal::from(eligible);
        match (self.present_days, self.absent_days) {
            (Some(present), _) => clamp_days(present, eligible),
            (None, Some(absent)) => eligible - clamp_days(absent, eligible),
            (None, None) => eligible,
        }
    }

    /// Returns the field and raw value that [`AttendanceRecord::present_days`]
    /// had to clamp, if any.
    ///
    /// Only the field that is actually read is checked, so a stale
    /// `absentDays` next to a valid `presentDays` is ignored.
    pub fn out_of_range_days(&self, eligible: u32) -> Option<(&'static str, Decimal)> {
        let eligible = Decimal::from(eligible);
        let outside = |days: Decimal| days < Decimal::ZERO || days > eligible;
        match (self.present_days, self.absent_days) {
            (Some(present), _) => outside(present).then_some(("present", present)),
            (None, Some(absent)) => outside(absent).then_some(("absent", absent)),
            (None, None) => None,
        }
    }

    /// Builds the entry submitted when saving attendance in bulk.
    pub fn to_entry(&self, eligible: u32) -> AttendanceEntry {
        AttendanceEntry {
            employee_id: self.employee_id.clone(),
            present_days: self.present_days(eligible),
            ot_hours: self.ot_hours.max(Decimal::ZERO),
        }
    }
}

fn clamp_days(days: Decimal, eligible: Decimal) -> Decimal {
    days.max(Decimal::ZERO).min(eligible)
}

/// A single row of a bulk attendance save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    /// The employee this row belongs to.
    pub employee_id: String,
    /// Days present in the month.
    pub present_days: Decimal,
    /// Overtime hours worked in the month.
    pub ot_hours: Decimal,
}

/// Request body for `PUT attendance/bulk`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceBulkSave {
    /// Month (1-12).
    pub month: u32,
    /// Four-digit year.
    pub year: i32,
    /// Working days the attendance was recorded against.
    pub working_days: u32,
    /// One entry per employee.
    pub attendance: Vec<AttendanceEntry>,
}

/// Working-day breakdown of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingDaysSummary {
    /// Payable working days in the month.
    #[serde(default, deserialize_with = "lenient_count")]
    pub working_days: u32,
    /// Active holidays that fall on a non-Sunday.
    #[serde(default, deserialize_with = "lenient_count")]
    pub holidays_count: u32,
    /// Sundays in the month.
    #[serde(default, deserialize_with = "lenient_count")]
    pub sundays: u32,
    /// Calendar days in the month.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_days: u32,
}
