//! Working days in a calendar month.
//!
//! Sundays are the weekly off day. Active holidays that fall on any other
//! day of the month reduce the working days further.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};
use crate::models::{Holiday, WorkingDaysSummary};

/// Default working days used when no calendar is available.
pub const DEFAULT_WORKING_DAYS: u32 = 26;

/// Returns the number of calendar days in a month.
pub fn days_in_month(year: i32, month: u32) -> EngineResult<u32> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(EngineError::InvalidPeriod { month, year })?;

    u32::try_from(next.signed_duration_since(first).num_days())
        .map_err(|_| EngineError::InvalidPeriod { month, year })
}

fn first_of_month(year: i32, month: u32) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(EngineError::InvalidPeriod { month, year })
}

/// Computes the working-day breakdown of a month from the holiday calendar.
///
/// Inactive holidays and holidays outside the month are ignored. A holiday
/// on a Sunday is not counted twice, and duplicate dates count once.
///
/// # Errors
///
/// Returns `InvalidPeriod` if `month` is not in 1-12.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::month_working_days;
///
/// // January 2026 has 31 days and 4 Sundays.
/// let summary = month_working_days(2026, 1, &[]).unwrap();
/// assert_eq!(summary.sundays, 4);
/// assert_eq!(summary.working_days, 27);
/// ```
pub fn month_working_days(
    year: i32,
    month: u32,
    holidays: &[Holiday],
) -> EngineResult<WorkingDaysSummary> {
    let total_days = days_in_month(year, month)?;
    let first = first_of_month(year, month)?;

    let sundays = first
        .iter_days()
        .take(total_days as usize)
        .filter(|d| d.weekday() == Weekday::Sun)
        .count() as u32;

    let holiday_dates: BTreeSet<NaiveDate> = holidays
        .iter()
        .filter(|h| h.is_active && h.falls_in(year, month))
        .map(|h| h.date)
        .filter(|d| d.weekday() != Weekday::Sun)
        .collect();
    let holidays_count = holiday_dates.len() as u32;

    let working_days = total_days.saturating_sub(sundays + holidays_count);

    tracing::debug!(
        year,
        month,
        total_days,
        sundays,
        holidays_count,
        working_days,
        "Computed month working days"
    );

    Ok(WorkingDaysSummary {
        working_days,
        holidays_count,
        sundays,
        total_days,
    })
}
