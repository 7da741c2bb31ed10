//! Calculation logic for the Payroll Engine.
//!
//! This module contains the pure payroll calculators: hire-date pro-rating,
//! salary breakup validation, overtime rate resolution, adjustment
//! aggregation, payslip composition, monthly working days, and the payroll
//! item builder that ties them together into a run.

mod adjustments;
mod eligible_days;
mod overtime_rate;
mod payroll_item;
mod payslip;
mod salary_breakup;
mod working_days;

pub use adjustments::{AdjustmentSummary, aggregate_adjustments};
pub use eligible_days::eligible_days;
pub use overtime_rate::{OvertimeRate, resolve_overtime_rate};
pub use payroll_item::{
    PayrollItemInput, PayrollItemResult, PayrollPeriod, PayrollRunResult, build_payroll_item,
    generate_payroll_run,
};
pub use payslip::{PayslipInput, PayslipTotals, compose_payslip};
pub use salary_breakup::{SalaryBreakupCheck, check_salary_breakup};
pub use working_days::{DEFAULT_WORKING_DAYS, days_in_month, month_working_days};
