//! Salary breakup reconciliation.
//!
//! Basic pay, HRA and allowance are expected to add up to the monthly salary.
//! A mismatch is reported to the operator but never blocks saving.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::round2;

/// The outcome of reconciling a salary breakup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBreakupCheck {
    /// Basic + HRA + allowance, rounded to 2 decimals.
    pub total: Decimal,
    /// Monthly salary minus total, rounded to 2 decimals.
    pub diff: Decimal,
    /// True when the components reconcile exactly.
    pub ok: bool,
    /// Operator-facing description of the mismatch.
    pub detail: Option<String>,
}

impl SalaryBreakupCheck {
    /// Turns a mismatch into a validation error for callers that block on it.
    pub fn ensure_ok(&self) -> EngineResult<()> {
        match &self.detail {
            Some(detail) if !self.ok => Err(EngineError::validation("salaryBreakup", detail.clone())),
            _ => Ok(()),
        }
    }
}

/// Reconciles a salary breakup against the monthly salary.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::check_salary_breakup;
/// use rust_decimal::Decimal;
///
/// let check = check_salary_breakup(
///     Decimal::from(13000),
///     Decimal::from(6500),
///     Decimal::from(6000),
///     Decimal::from(26000),
/// );
/// assert!(!check.ok);
/// assert_eq!(check.diff, Decimal::from(500));
/// ```
pub fn check_salary_breakup(
    basic_pay: Decimal,
    hra: Decimal,
    allowance: Decimal,
    monthly_salary: Decimal,
) -> SalaryBreakupCheck {
    let total = round2(basic_pay.saturating_add(hra).saturating_add(allowance));
    let diff = round2(monthly_salary.saturating_sub(total));
    let ok = diff.is_zero();

    let detail = if ok {
        None
    } else if diff.is_sign_positive() {
        Some(format!(
            "Breakup total {} is {} short of monthly salary {}",
            total, diff, monthly_salary
        ))
    } else {
        Some(format!(
            "Breakup total {} exceeds monthly salary {} by {}",
            total,
            monthly_salary,
            diff.abs()
        ))
    };

    SalaryBreakupCheck {
        total,
        diff,
        ok,
        detail,
    }
}
