//! Holiday calendar entries.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::dates::iso_date;

fn default_active() -> bool {
    true
}

/// A company holiday.
///
/// Only active holidays reduce the working days of a month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     id: "hol_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
///     name: Some("Republic Day".to_string()),
///     is_active: true,
/// };
/// assert!(holiday.falls_in(2026, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    /// Unique identifier for the holiday.
    pub id: String,
    /// The calendar date of the holiday.
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the holiday is currently observed.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Holiday {
    /// Returns true if the holiday is in the given month of the given year.
    pub fn falls_in(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }
}

/// Request body for adding or editing a holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayInput {
    /// The calendar date of the holiday.
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    /// Optional display name; sent as `null` when blank.
    pub name: Option<String>,
}

impl HolidayInput {
    /// Creates an input, dropping a blank name.
    ///
    /// ```
    /// use payroll_engine::models::HolidayInput;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 8, 15).unwrap();
    /// assert_eq!(HolidayInput::new(date, Some("  ".to_string())).name, None);
    /// ```
    pub fn new(date: NaiveDate, name: Option<String>) -> Self {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        Self { date, name }
    }
}
