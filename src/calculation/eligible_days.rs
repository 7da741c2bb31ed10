//! Eligible day calculation.
//!
//! This module determines how many of a month's working days an employee can
//! be paid for, pro-rating the month they were hired in.

use chrono::{Datelike, NaiveDate};

/// Returns the number of payable days for an employee in a month.
///
/// - Hired after the target month: 0.
/// - Hired during the target month: `working_days - hire_day + 1`, never
///   below 0.
/// - Hired before the target month, or no hire date on file: `working_days`.
///
/// # Arguments
///
/// * `hire_date` - The employee's hire date, if known
/// * `year` - The target year
/// * `month` - The target month (1-12)
/// * `working_days` - Payable working days in the target month
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::eligible_days;
/// use chrono::NaiveDate;
///
/// let hired = NaiveDate::from_ymd_opt(2026, 1, 15);
/// assert_eq!(eligible_days(hired, 2026, 1, 26), 12);
/// assert_eq!(eligible_days(hired, 2026, 2, 24), 24);
/// assert_eq!(eligible_days(hired, 2025, 12, 26), 0);
/// ```
pub fn eligible_days(hire_date: Option<NaiveDate>, year: i32, month: u32, working_days: u32) -> u32 {
    let Some(hired) = hire_date else {
        return working_days;
    };

    let hire_period = (hired.year(), hired.month());
    let target_period = (year, month);

    if hire_period > target_period {
        0
    } else if hire_period == target_period {
        working_days.saturating_add(1).saturating_sub(hired.day())
    } else {
        working_days
    }
}
