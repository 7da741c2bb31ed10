//! Payroll adjustment aggregation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AdjustmentLine, AdjustmentType, round2};

/// Totals of a set of adjustments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentSummary {
    /// Sum of ADDITION amounts.
    pub additions: Decimal,
    /// Sum of DEDUCTION amounts.
    pub deductions: Decimal,
    /// Additions minus deductions.
    pub net: Decimal,
}

/// Sums additions and deductions into a net adjustment.
///
/// Sums saturate instead of overflowing. This does not check whether the
/// owning payroll run is locked; that is the caller's job.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::aggregate_adjustments;
/// use payroll_engine::models::{AdjustmentLine, AdjustmentType};
/// use rust_decimal::Decimal;
///
/// let summary = aggregate_adjustments([
///     AdjustmentLine { adjustment_type: AdjustmentType::Addition, amount: Decimal::from(100) },
///     AdjustmentLine { adjustment_type: AdjustmentType::Deduction, amount: Decimal::from(30) },
/// ]);
/// assert_eq!(summary.net, Decimal::from(70));
/// ```
pub fn aggregate_adjustments<I>(lines: I) -> AdjustmentSummary
where
    I: IntoIterator<Item = AdjustmentLine>,
{
    let (additions, deductions) = lines.into_iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(additions, deductions), line| match line.adjustment_type {
            AdjustmentType::Addition => (additions.saturating_add(line.amount), deductions),
            AdjustmentType::Deduction => (additions, deductions.saturating_add(line.amount)),
        },
    );

    AdjustmentSummary {
        additions: round2(additions),
        deductions: round2(deductions),
        net: round2(additions.saturating_sub(deductions)),
    }
}
