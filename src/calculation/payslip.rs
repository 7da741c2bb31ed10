//! Payslip totals.
//!
//! Combines regular pay, overtime pay and adjustments into the gross and net
//! figures shown on a payslip. The computation has no hidden state, so the
//! same input always yields the same totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    AdjustmentLine, PayrollAdjustment, PayrollItem, Payslip, lenient_decimal, round2,
};

use super::adjustments::aggregate_adjustments;

/// The figures a payslip is composed from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipInput {
    /// Basic pay component (display only).
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub basic_pay: Decimal,
    /// HRA component (display only).
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub hra: Decimal,
    /// Allowance component (display only).
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub allowance: Decimal,
    /// Pay for present days.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub regular_pay: Decimal,
    /// Pay for overtime hours.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub ot_pay: Decimal,
    /// Adjustments on the payslip.
    #[serde(default)]
    pub adjustments: Vec<AdjustmentLine>,
}

impl From<&PayrollItem> for PayslipInput {
    fn from(item: &PayrollItem) -> Self {
        Self {
            basic_pay: item.basic_pay,
            hra: item.hra,
            allowance: item.allowance,
            regular_pay: item.regular_pay,
            ot_pay: item.ot_pay,
            adjustments: item.adjustments.iter().map(PayrollAdjustment::line).collect(),
        }
    }
}

/// The composed payslip totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipTotals {
    /// Basic pay component.
    pub basic_pay: Decimal,
    /// HRA component.
    pub hra: Decimal,
    /// Allowance component.
    pub allowance: Decimal,
    /// Pay for present days.
    pub regular_pay: Decimal,
    /// Pay for overtime hours.
    pub ot_pay: Decimal,
    /// Regular plus overtime pay.
    pub gross_pay: Decimal,
    /// Sum of additions.
    pub additions: Decimal,
    /// Sum of deductions.
    pub deductions: Decimal,
    /// Additions minus deductions.
    pub net_adjustment: Decimal,
    /// Gross pay plus net adjustment, rounded to 2 decimals.
    pub net_pay: Decimal,
}

/// Composes payslip totals from pay components and adjustments.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{compose_payslip, PayslipInput};
/// use payroll_engine::models::{AdjustmentLine, AdjustmentType};
/// use rust_decimal::Decimal;
///
/// let input = PayslipInput {
///     regular_pay: Decimal::from(20000),
///     adjustments: vec![
///         AdjustmentLine { adjustment_type: AdjustmentType::Addition, amount: Decimal::from(500) },
///         AdjustmentLine { adjustment_type: AdjustmentType::Deduction, amount: Decimal::from(200) },
///     ],
///     ..Default::default()
/// };
/// assert_eq!(compose_payslip(&input).net_pay, Decimal::from(20300));
/// ```
pub fn compose_payslip(input: &PayslipInput) -> PayslipTotals {
    let gross_pay = input.regular_pay.saturating_add(input.ot_pay);
    let summary = aggregate_adjustments(input.adjustments.iter().copied());

    PayslipTotals {
        basic_pay: input.basic_pay,
        hra: input.hra,
        allowance: input.allowance,
        regular_pay: input.regular_pay,
        ot_pay: input.ot_pay,
        gross_pay: round2(gross_pay),
        additions: summary.additions,
        deductions: summary.deductions,
        net_adjustment: summary.net,
        net_pay: round2(gross_pay.saturating_add(summary.net)),
    }
}

impl Payslip {
    /// Recomposes the totals from the payslip's own components.
    pub fn totals(&self) -> PayslipTotals {
        compose_payslip(&PayslipInput::from(&self.item))
    }
}
