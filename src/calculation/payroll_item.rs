//! Payroll item building and run generation.
//!
//! Turns each employee's attendance and salary structure into a
//! [`PayrollItem`] snapshot, recording every step in an audit trace.
//!
//! The pipeline for one employee is:
//!
//! 1. eligible days for the month (hire-date pro-rating)
//! 2. present days clamped to the eligible days
//! 3. regular pay = per-day wage x present days
//! 4. overtime rate from the salary structure's policy
//! 5. overtime pay = overtime hours x rate
//! 6. gross pay = regular + overtime

use std::collections::HashSet;
use std::time::Instant;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::PayrollSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AuditStep, AuditTrace, AuditWarning, DepartmentRef, PayrollEmployee,
    PayrollItem, PayrollRun, PayrollStatus, SalaryStructure, round2,
};

use super::eligible_days::eligible_days;
use super::overtime_rate::{resolve_overtime_rate, safe_div};
use super::salary_breakup::check_salary_breakup;
use super::working_days::days_in_month;

/// The month a payroll is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollPeriod {
    /// Month (1-12).
    pub month: u32,
    /// Four-digit year.
    pub year: i32,
    /// Payable working days in the month.
    pub working_days: u32,
}

/// One employee's inputs to payroll generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollItemInput {
    /// The employee's attendance for the month.
    pub attendance: AttendanceRecord,
    /// The employee's salary structure, if one has been saved.
    #[serde(default)]
    pub salary_structure: Option<SalaryStructure>,
}

/// A built payroll item with the audit steps and warnings behind it.
#[derive(Debug, Clone)]
pub struct PayrollItemResult {
    /// The computed payroll item.
    pub item: PayrollItem,
    /// The eligible days the employee was paid against.
    pub eligible_days: u32,
    /// Audit steps, in order.
    pub audit_steps: Vec<AuditStep>,
    /// Data-quality warnings for this employee.
    pub warnings: Vec<AuditWarning>,
}

/// A generated payroll run with its audit trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRunResult {
    /// Unique identifier for this generation.
    pub calculation_id: Uuid,
    /// When the run was generated.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that generated the run.
    pub engine_version: String,
    /// The period the run was generated for.
    pub period: PayrollPeriod,
    /// The generated DRAFT run.
    pub run: PayrollRun,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

fn step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    employee_id: &str,
    input: serde_json::Value,
    output: serde_json::Value,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        employee_id: employee_id.to_string(),
        input,
        output,
        reasoning,
    }
}

fn warning(code: &str, message: String, severity: &str) -> AuditWarning {
    AuditWarning {
        code: code.to_string(),
        message,
        severity: severity.to_string(),
    }
}

/// Builds one employee's payroll item for a period.
///
/// Audit steps are numbered from `step_number`. Without a salary structure
/// the monthly salary comes from the attendance row, the breakup is zero and
/// the company default overtime policy applies.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{build_payroll_item, PayrollItemInput, PayrollPeriod};
/// use payroll_engine::config::PayrollSettings;
/// use payroll_engine::models::AttendanceRecord;
/// use rust_decimal::Decimal;
///
/// let attendance: AttendanceRecord = serde_json::from_str(
///     r#"{"employeeId": "emp_001", "hireDate": "2026-01-15", "salary": 26000, "presentDays": 12}"#,
/// ).unwrap();
/// let input = PayrollItemInput { attendance, salary_structure: None };
/// let period = PayrollPeriod { month: 1, year: 2026, working_days: 26 };
///
/// let result = build_payroll_item(&period, &input, &PayrollSettings::default(), 1);
/// assert_eq!(result.eligible_days, 12);
/// assert_eq!(result.item.regular_pay, Decimal::from(12000));
/// ```
pub fn build_payroll_item(
    period: &PayrollPeriod,
    input: &PayrollItemInput,
    settings: &PayrollSettings,
    step_number: u32,
) -> PayrollItemResult {
    let attendance = &input.attendance;
    let employee_id = attendance.employee_id.as_str();
    let mut steps = Vec::with_capacity(6);
    let mut warnings = Vec::new();
    let mut next_step = step_number;

    let (monthly_salary, basic_pay, hra, allowance, policy) = match &input.salary_structure {
        Some(structure) => {
            let check = check_salary_breakup(
                structure.basic_pay,
                structure.hra,
                structure.allowance,
                structure.monthly_salary,
            );
            if let Some(detail) = check.detail {
                tracing::warn!(
                    employee_id,
                    total = %check.total,
                    diff = %check.diff,
                    "Salary breakup does not match monthly salary"
                );
                warnings.push(warning(
                    "SALARY_BREAKUP_MISMATCH",
                    format!("Employee {}: {}", employee_id, detail),
                    "medium",
                ));
            }
            (
                structure.monthly_salary,
                structure.basic_pay,
                structure.hra,
                structure.allowance,
                structure.policy(),
            )
        }
        None => {
            warnings.push(warning(
                "NO_SALARY_STRUCTURE",
                format!(
                    "Employee {} has no salary structure; using salary {} and default overtime",
                    employee_id, attendance.salary
                ),
                "low",
            ));
            (
                attendance.salary,
                Decimal::ZERO,
                Decimal::ZERO,
                Decimal::ZERO,
                settings.overtime.default_policy(),
            )
        }
    };

    // Step 1: eligible days
    let eligible = eligible_days(
        attendance.hire_date,
        period.year,
        period.month,
        period.working_days,
    );
    steps.push(step(
        next_step,
        "eligible_days",
        "Eligible Days",
        employee_id,
        serde_json::json!({
            "hire_date": attendance.hire_date.map(|d| d.to_string()),
            "year": period.year,
            "month": period.month,
            "working_days": period.working_days
        }),
        serde_json::json!({ "eligible_days": eligible }),
        match attendance.hire_date {
            Some(hired) => format!(
                "Hired {}; {} of {} working days payable",
                hired, eligible, period.working_days
            ),
            None => format!(
                "No hire date on file; all {} working days payable",
                period.working_days
            ),
        },
    ));
    next_step += 1;

    // Step 2: present days
    let present_days = attendance.present_days(eligible);
    if let Some((field, recorded)) = attendance.out_of_range_days(eligible) {
        warnings.push(warning(
            "PRESENT_DAYS_CLAMPED",
            format!(
                "Employee {}: recorded {} {} days, clamped to {} present",
                employee_id, recorded, field, present_days
            ),
            "low",
        ));
    }
    steps.push(step(
        next_step,
        "present_days",
        "Present Days",
        employee_id,
        serde_json::json!({
            "present_days": attendance.present_days.map(|d| d.to_string()),
            "absent_days": attendance.absent_days.map(|d| d.to_string()),
            "eligible_days": eligible
        }),
        serde_json::json!({ "present_days": present_days.to_string() }),
        format!("{} present days within {} eligible", present_days, eligible),
    ));
    next_step += 1;

    // Step 3: regular pay
    let working_days = Decimal::from(period.working_days);
    let per_day = safe_div(monthly_salary, working_days);
    let regular_pay = round2(per_day.checked_mul(present_days).unwrap_or(Decimal::ZERO));
    steps.push(step(
        next_step,
        "regular_pay",
        "Regular Pay",
        employee_id,
        serde_json::json!({
            "monthly_salary": monthly_salary.to_string(),
            "working_days": period.working_days,
            "present_days": present_days.to_string()
        }),
        serde_json::json!({
            "per_day_wage": round2(per_day).to_string(),
            "regular_pay": regular_pay.to_string()
        }),
        format!(
            "${} / {} days x {} present = ${}",
            monthly_salary, period.working_days, present_days, regular_pay
        ),
    ));
    next_step += 1;

    // Step 4: overtime rate
    let ot_rate = resolve_overtime_rate(
        monthly_salary,
        working_days,
        settings.working_hours_per_day,
        &policy,
    );
    steps.push(step(
        next_step,
        "overtime_rate",
        "Overtime Rate",
        employee_id,
        serde_json::json!(policy),
        serde_json::json!({
            "hourly_wage": ot_rate.hourly_wage.to_string(),
            "rate": ot_rate.rate.to_string()
        }),
        format!(
            "{:?} overtime at ${} per hour",
            ot_rate.ot_type, ot_rate.rate
        ),
    ));
    next_step += 1;

    // Step 5: overtime pay
    let ot_hours = attendance.ot_hours.max(Decimal::ZERO);
    let ot_pay = round2(ot_hours.checked_mul(ot_rate.rate).unwrap_or(Decimal::ZERO));
    steps.push(step(
        next_step,
        "overtime_pay",
        "Overtime Pay",
        employee_id,
        serde_json::json!({
            "ot_hours": ot_hours.to_string(),
            "rate": ot_rate.rate.to_string()
        }),
        serde_json::json!({ "ot_pay": ot_pay.to_string() }),
        format!("{} hours x ${} = ${}", ot_hours, ot_rate.rate, ot_pay),
    ));
    next_step += 1;

    // Step 6: gross pay
    let gross_pay = round2(regular_pay.saturating_add(ot_pay));
    steps.push(step(
        next_step,
        "gross_pay",
        "Gross Pay",
        employee_id,
        serde_json::json!({
            "regular_pay": regular_pay.to_string(),
            "ot_pay": ot_pay.to_string()
        }),
        serde_json::json!({ "gross_pay": gross_pay.to_string() }),
        format!("${} + ${} = ${}", regular_pay, ot_pay, gross_pay),
    ));

    let employee = PayrollEmployee {
        id: Some(attendance.employee_id.clone()),
        first_name: attendance.name.clone(),
        last_name: None,
        email: attendance.email.clone(),
        phone: None,
        hire_date: attendance.hire_date,
        department: attendance.department.clone().map(|name| DepartmentRef { id: None, name }),
        role: None,
    };

    let item = PayrollItem {
        id: Uuid::new_v4().to_string(),
        employee_id: attendance.employee_id.clone(),
        employee: Some(employee),
        monthly_salary,
        present_days,
        ot_hours,
        basic_pay,
        hra,
        allowance,
        regular_pay,
        ot_pay,
        gross_pay,
        adjustment_total: Decimal::ZERO,
        net_pay: gross_pay,
        adjustments: Vec::new(),
    };

    PayrollItemResult {
        item,
        eligible_days: eligible,
        audit_steps: steps,
        warnings,
    }
}

/// Generates a DRAFT payroll run with one item per input.
///
/// # Errors
///
/// - `InvalidPeriod` if the month is not in 1-12
/// - `Validation` if working days exceed the month's length or an employee
///   appears twice
pub fn generate_payroll_run(
    period: &PayrollPeriod,
    inputs: &[PayrollItemInput],
    settings: &PayrollSettings,
) -> EngineResult<PayrollRunResult> {
    let start_time = Instant::now();

    let month_length = days_in_month(period.year, period.month)?;
    if period.working_days > month_length {
        return Err(EngineError::validation(
            "workingDays",
            format!(
                "Working days {} exceed the {} days in {}/{}",
                period.working_days, month_length, period.month, period.year
            ),
        ));
    }

    let mut seen = HashSet::with_capacity(inputs.len());
    for input in inputs {
        if !seen.insert(input.attendance.employee_id.as_str()) {
            return Err(EngineError::validation(
                "employeeId",
                format!("Duplicate employee: {}", input.attendance.employee_id),
            ));
        }
    }

    let mut items = Vec::with_capacity(inputs.len());
    let mut trace = AuditTrace::default();
    let mut step_number: u32 = 1;

    for input in inputs {
        let result = build_payroll_item(period, input, settings, step_number);
        step_number += result.audit_steps.len() as u32;
        trace.steps.extend(result.audit_steps);
        trace.warnings.extend(result.warnings);
        items.push(result.item);
    }

    let run = PayrollRun {
        id: Uuid::new_v4().to_string(),
        month: period.month,
        year: period.year,
        status: PayrollStatus::Draft,
        items,
    };
    trace.duration_us = start_time.elapsed().as_micros() as u64;

    tracing::info!(
        run_id = %run.id,
        month = period.month,
        year = period.year,
        working_days = period.working_days,
        items = run.items.len(),
        warnings = trace.warnings.len(),
        total_net_pay = %run.total_net_pay(),
        "Payroll run generated"
    );

    Ok(PayrollRunResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        period: *period,
        run,
        audit_trace: trace,
    })
}
