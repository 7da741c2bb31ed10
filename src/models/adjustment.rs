//! Payroll adjustment models.
//!
//! Adjustments are manual additions or deductions recorded against a
//! single payroll item for a specific date and reason.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::dates::{iso_date, iso_date_opt};
use super::money::lenient_decimal;

/// Whether an adjustment adds to or deducts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdjustmentType {
    /// Adds the amount to net pay (bonus, reimbursement).
    Addition,
    /// Subtracts the amount from net pay (advance recovery, penalty).
    Deduction,
}

/// The minimal shape the aggregator needs: a direction and an amount.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AdjustmentLine, AdjustmentType};
/// use rust_decimal::Decimal;
///
/// let line = AdjustmentLine {
///     adjustment_type: AdjustmentType::Deduction,
///     amount: Decimal::from(200),
/// };
/// assert_eq!(line.signed_amount(), Decimal::from(-200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentLine {
    /// Addition or deduction.
    #[serde(rename = "type")]
    pub adjustment_type: AdjustmentType,
    /// The unsigned amount.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Decimal,
}

impl AdjustmentLine {
    /// Returns `+amount` for additions and `-amount` for deductions.
    pub fn signed_amount(&self) -> Decimal {
        match self.adjustment_type {
            AdjustmentType::Addition => self.amount,
            AdjustmentType::Deduction => -self.amount,
        }
    }
}

/// A recorded adjustment on a payroll item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollAdjustment {
    /// Unique identifier for the adjustment.
    pub id: String,
    /// The payroll item this adjustment belongs to.
    pub payroll_item_id: String,
    /// The date the adjustment applies to. `None` when the stored date is
    /// missing or unreadable; the amount still counts toward the totals.
    #[serde(default, with = "iso_date_opt")]
    pub date: Option<NaiveDate>,
    /// Addition or deduction.
    #[serde(rename = "type")]
    pub adjustment_type: AdjustmentType,
    /// The unsigned amount.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Decimal,
    /// Why the adjustment was made (e.g. "Advance Salary").
    pub reason: String,
    /// Free-form operator notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl PayrollAdjustment {
    /// Returns the direction and amount of this adjustment.
    pub fn line(&self) -> AdjustmentLine {
        AdjustmentLine {
            adjustment_type: self.adjustment_type,
            amount: self.amount,
        }
    }
}

/// Request body for recording a new adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdjustment {
    /// The payroll item the adjustment is for.
    pub payroll_item_id: String,
    /// The date the adjustment applies to.
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    /// Addition or deduction.
    #[serde(rename = "type")]
    pub adjustment_type: AdjustmentType,
    /// The unsigned amount; must be greater than zero.
    pub amount: Decimal,
    /// Why the adjustment was made.
    pub reason: String,
    /// Free-form operator notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewAdjustment {
    /// Checks the adjustment before it is submitted.
    ///
    /// Rejects a blank payroll item, a non-positive amount, or a blank reason.
    /// Reason and notes are trimmed, and blank notes become `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{AdjustmentType, NewAdjustment};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let adjustment = NewAdjustment {
    ///     payroll_item_id: "item_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
    ///     adjustment_type: AdjustmentType::Deduction,
    ///     amount: Decimal::ZERO,
    ///     reason: "Advance Salary".to_string(),
    ///     notes: None,
    /// };
    /// assert!(adjustment.validate().is_err());
    /// ```
    pub fn validate(self) -> EngineResult<Self> {
        if self.payroll_item_id.trim().is_empty() {
            return Err(EngineError::validation(
                "payrollItemId",
                "Payroll item is required",
            ));
        }
        if self.amount <= Decimal::ZERO {
            return Err(EngineError::validation(
                "amount",
                "Amount must be greater than 0",
            ));
        }
        let reason = self.reason.trim().to_string();
        if reason.is_empty() {
            return Err(EngineError::validation("reason", "Reason is required"));
        }
        let notes = self
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Self {
            reason,
            notes,
            ..self
        })
    }
}
