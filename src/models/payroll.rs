//! Payroll runs, items and payslips.
//!
//! A [`PayrollRun`] holds one [`PayrollItem`] per employee for a month. The
//! run moves through DRAFT, GENERATED and PAID in that order only. Once PAID,
//! the run and every adjustment on it are locked; [`PayrollRun::ensure_mutable`]
//! is the single place that rule is checked.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::aggregate_adjustments;
use crate::error::{EngineError, EngineResult};

use super::adjustment::{NewAdjustment, PayrollAdjustment};
use super::dates::iso_date_opt;
use super::employee::{DepartmentRef, RoleRef};
use super::money::{lenient_decimal, round2};

/// Lifecycle status of a payroll run.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollStatus;
///
/// assert!(PayrollStatus::Draft.can_transition_to(PayrollStatus::Generated));
/// assert!(!PayrollStatus::Draft.can_transition_to(PayrollStatus::Paid));
/// assert!(PayrollStatus::Paid.is_locked());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PayrollStatus {
    /// Freshly generated; can be regenerated and adjusted.
    #[default]
    Draft,
    /// Reviewed and finalized for payment; still adjustable.
    Generated,
    /// Paid out. Terminal and locked.
    Paid,
}

impl PayrollStatus {
    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayrollStatus::Draft => "DRAFT",
            PayrollStatus::Generated => "GENERATED",
            PayrollStatus::Paid => "PAID",
        }
    }

    /// Returns true only for the two forward steps.
    pub fn can_transition_to(self, next: PayrollStatus) -> bool {
        matches!(
            (self, next),
            (PayrollStatus::Draft, PayrollStatus::Generated)
                | (PayrollStatus::Generated, PayrollStatus::Paid)
        )
    }

    /// Returns `next` if the step is allowed.
    pub fn transition_to(self, next: PayrollStatus) -> EngineResult<PayrollStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(EngineError::InvalidStatusTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Returns true once no further changes are accepted.
    pub fn is_locked(self) -> bool {
        self == PayrollStatus::Paid
    }
}

impl fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The employee snapshot embedded in payroll items and payslips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollEmployee {
    /// Employee ID, when included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Hire date.
    #[serde(default, with = "iso_date_opt")]
    pub hire_date: Option<NaiveDate>,
    /// Department.
    #[serde(default)]
    pub department: Option<DepartmentRef>,
    /// Role.
    #[serde(default)]
    pub role: Option<RoleRef>,
}

impl PayrollEmployee {
    /// Returns "First Last" with surrounding whitespace removed.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name,
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

/// One employee's pay for a payroll run.
///
/// `net_pay` always equals `gross_pay + adjustment_total`; every method that
/// changes adjustments calls [`PayrollItem::recompute_totals`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollItem {
    /// Unique identifier for the item.
    pub id: String,
    /// The employee being paid.
    #[serde(default)]
    pub employee_id: String,
    /// Employee snapshot, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<PayrollEmployee>,
    /// Monthly salary used for the calculation.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub monthly_salary: Decimal,
    /// Payable present days.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub present_days: Decimal,
    /// Overtime hours.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub ot_hours: Decimal,
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
    /// Regular plus overtime pay.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gross_pay: Decimal,
    /// Net of all adjustments.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub adjustment_total: Decimal,
    /// Gross pay plus adjustment total.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub net_pay: Decimal,
    /// Manual adjustments on this item.
    #[serde(default)]
    pub adjustments: Vec<PayrollAdjustment>,
}

impl PayrollItem {
    /// Recomputes `adjustment_total` and `net_pay` from the adjustments.
    pub fn recompute_totals(&mut self) {
        let summary = aggregate_adjustments(self.adjustments.iter().map(PayrollAdjustment::line));
        self.adjustment_total = summary.net;
        self.net_pay = round2(self.gross_pay.saturating_add(summary.net));
    }

    /// Returns the adjustments ordered by date, oldest first. Undated
    /// adjustments come last.
    pub fn adjustments_by_date(&self) -> Vec<&PayrollAdjustment> {
        let mut sorted: Vec<&PayrollAdjustment> = self.adjustments.iter().collect();
        sorted.sort_by_key(|a| (a.date.is_none(), a.date));
        sorted
    }
}

/// A month's payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRun {
    /// Unique identifier for the run.
    pub id: String,
    /// Month (1-12).
    pub month: u32,
    /// Four-digit year.
    pub year: i32,
    /// Current lifecycle status.
    #[serde(default)]
    pub status: PayrollStatus,
    /// One item per employee.
    #[serde(default)]
    pub items: Vec<PayrollItem>,
}

impl PayrollRun {
    /// Fails with [`EngineError::PayrollLocked`] once the run is PAID.
    pub fn ensure_mutable(&self) -> EngineResult<()> {
        if self.status.is_locked() {
            return Err(EngineError::PayrollLocked {
                run_id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Moves the run one step forward.
    pub fn advance_to(&mut self, next: PayrollStatus) -> EngineResult<()> {
        self.status = self.status.transition_to(next)?;
        tracing::info!(run_id = %self.id, status = %self.status, "Payroll status updated");
        Ok(())
    }

    /// Finds an item by ID.
    pub fn item(&self, item_id: &str) -> Option<&PayrollItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Finds an item by employee ID.
    pub fn item_for_employee(&self, employee_id: &str) -> Option<&PayrollItem> {
        self.items.iter().find(|i| i.employee_id == employee_id)
    }

    /// Validates and records a new adjustment, returning the stored record.
    ///
    /// # Errors
    ///
    /// Returns `PayrollLocked` on a PAID run, `Validation` for a bad
    /// adjustment, and `PayrollItemNotFound` for an unknown item.
    pub fn add_adjustment(&mut self, new: NewAdjustment) -> EngineResult<PayrollAdjustment> {
        self.ensure_mutable()?;
        let new = new.validate()?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == new.payroll_item_id)
            .ok_or_else(|| EngineError::PayrollItemNotFound {
                id: new.payroll_item_id.clone(),
            })?;

        let adjustment = PayrollAdjustment {
            id: Uuid::new_v4().to_string(),
            payroll_item_id: item.id.clone(),
            date: Some(new.date),
            adjustment_type: new.adjustment_type,
            amount: round2(new.amount),
            reason: new.reason,
            notes: new.notes,
        };
        item.adjustments.push(adjustment.clone());
        item.recompute_totals();

        tracing::debug!(
            run_id = %self.id,
            adjustment_id = %adjustment.id,
            payroll_item_id = %adjustment.payroll_item_id,
            "Adjustment added"
        );
        Ok(adjustment)
    }

    /// Removes an adjustment by ID, returning the removed record.
    pub fn remove_adjustment(&mut self, adjustment_id: &str) -> EngineResult<PayrollAdjustment> {
        self.ensure_mutable()?;

        for item in &mut self.items {
            if let Some(pos) = item.adjustments.iter().position(|a| a.id == adjustment_id) {
                let removed = item.adjustments.remove(pos);
                item.recompute_totals();
                tracing::debug!(run_id = %self.id, adjustment_id, "Adjustment removed");
                return Ok(removed);
            }
        }

        Err(EngineError::AdjustmentNotFound {
            id: adjustment_id.to_string(),
        })
    }

    /// Replaces the items with a freshly generated snapshot.
    ///
    /// Existing adjustments follow their employee into the new items. The
    /// status is left as it is; only [`PayrollRun::advance_to`] moves it.
    /// Employees missing from the fresh snapshot lose their item along with
    /// its adjustments.
    pub fn regenerate(&mut self, fresh: Vec<PayrollItem>) -> EngineResult<()> {
        self.ensure_mutable()?;

        let mut previous = std::mem::take(&mut self.items);
        let mut items = fresh;
        for item in &mut items {
            if let Some(old) = previous.iter_mut().find(|o| o.employee_id == item.employee_id) {
                let item_id = item.id.clone();
                item.adjustments = std::mem::take(&mut old.adjustments)
                    .into_iter()
                    .map(|a| PayrollAdjustment {
                        payroll_item_id: item_id.clone(),
                        ..a
                    })
                    .collect();
            }
            item.recompute_totals();
        }

        self.items = items;
        tracing::info!(
            run_id = %self.id,
            status = %self.status,
            items = self.items.len(),
            "Payroll run regenerated"
        );
        Ok(())
    }

    /// Sums net pay across all items.
    pub fn total_net_pay(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, i| acc.saturating_add(i.net_pay))
    }
}

/// Request body for `POST payroll/run/generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratePayrollRequest {
    /// Month (1-12).
    pub month: u32,
    /// Four-digit year.
    pub year: i32,
}

/// Request body for the status PATCH endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate<S> {
    /// The requested status.
    pub status: S,
}

/// The run header embedded in a payslip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipRunHeader {
    /// Month (1-12).
    pub month: u32,
    /// Four-digit year.
    pub year: i32,
    /// Status of the run.
    #[serde(default)]
    pub status: PayrollStatus,
}

/// A payslip: a payroll item plus its run header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payslip {
    /// The run this payslip belongs to.
    pub payroll_run: PayslipRunHeader,
    /// The item with its employee and adjustments.
    #[serde(flatten)]
    pub item: PayrollItem,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdjustmentType;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn item(id: &str, employee_id: &str, gross: &str) -> PayrollItem {
        PayrollItem {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            employee: None,
            monthly_salary: dec("26000"),
            present_days: dec("26"),
            ot_hours: Decimal::ZERO,
            basic_pay: Decimal::ZERO,
            hra: Decimal::ZERO,
            allowance: Decimal::ZERO,
            regular_pay: dec(gross),
            ot_pay: Decimal::ZERO,
            gross_pay: dec(gross),
            adjustment_total: Decimal::ZERO,
            net_pay: dec(gross),
            adjustments: vec![],
        }
    }

    fn run(status: PayrollStatus) -> PayrollRun {
        PayrollRun {
            id: "run_001".to_string(),
            month: 1,
            year: 2026,
            status,
            items: vec![item("item_001", "emp_001", "20000")],
        }
    }

    fn new_adjustment(kind: AdjustmentType, amount: &str, day: u32) -> NewAdjustment {
        NewAdjustment {
            payroll_item_id: "item_001".to_string(),
            date: date(day),
            adjustment_type: kind,
            amount: dec(amount),
            reason: "Manual".to_string(),
            notes: None,
        }
    }

    /// PS-001: only forward single steps are allowed
    #[test]
    fn test_status_transitions() {
        use PayrollStatus::*;
        let all = [Draft, Generated, Paid];
        for from in all {
            for to in all {
                let expected = matches!((from, to), (Draft, Generated) | (Generated, Paid));
                assert_eq!(from.can_transition_to(to), expected, "{} -> {}", from, to);
                assert_eq!(from.transition_to(to).is_ok(), expected);
            }
        }
    }

    #[test]
    fn test_status_display_and_serde() {
        assert_eq!(PayrollStatus::Generated.to_string(), "GENERATED");
        assert_eq!(
            serde_json::to_string(&PayrollStatus::Paid).unwrap(),
            "\"PAID\""
        );
        let status: PayrollStatus = serde_json::from_str("\"DRAFT\"").unwrap();
        assert_eq!(status, PayrollStatus::Draft);
    }

    #[test]
    fn test_advance_to_rejects_skipping() {
        let mut run = run(PayrollStatus::Draft);
        match run.advance_to(PayrollStatus::Paid) {
            Err(EngineError::InvalidStatusTransition { from, to }) => {
                assert_eq!(from, PayrollStatus::Draft);
                assert_eq!(to, PayrollStatus::Paid);
            }
            other => panic!("Expected InvalidStatusTransition, got {:?}", other),
        }
        run.advance_to(PayrollStatus::Generated).unwrap();
        run.advance_to(PayrollStatus::Paid).unwrap();
        assert_eq!(run.status, PayrollStatus::Paid);
    }

    /// PS-002: adding and removing adjustments keeps net pay consistent
    #[test]
    fn test_add_and_remove_adjustment_recomputes_net() {
        let mut run = run(PayrollStatus::Generated);
        run.add_adjustment(new_adjustment(AdjustmentType::Addition, "500", 5))
            .unwrap();
        let deduction = run
            .add_adjustment(new_adjustment(AdjustmentType::Deduction, "200", 3))
            .unwrap();

        let item = run.item("item_001").unwrap();
        assert_eq!(item.adjustment_total, dec("300"));
        assert_eq!(item.net_pay, dec("20300"));
        assert_eq!(item.net_pay, item.gross_pay + item.adjustment_total);

        run.remove_adjustment(&deduction.id).unwrap();
        let item = run.item("item_001").unwrap();
        assert_eq!(item.adjustment_total, dec("500"));
        assert_eq!(item.net_pay, dec("20500"));
    }

    /// PS-003: PAID runs reject every mutation
    #[test]
    fn test_paid_run_is_locked() {
        let mut run = run(PayrollStatus::Paid);

        let add = run.add_adjustment(new_adjustment(AdjustmentType::Addition, "500", 5));
        assert!(matches!(add, Err(EngineError::PayrollLocked { .. })));

        let remove = run.remove_adjustment("adj_001");
        assert!(matches!(remove, Err(EngineError::PayrollLocked { .. })));

        let regenerate = run.regenerate(vec![]);
        assert!(matches!(regenerate, Err(EngineError::PayrollLocked { .. })));
    }

    #[test]
    fn test_lock_is_checked_before_validation() {
        let mut run = run(PayrollStatus::Paid);
        let result = run.add_adjustment(new_adjustment(AdjustmentType::Addition, "0", 5));
        assert!(matches!(result, Err(EngineError::PayrollLocked { .. })));
    }

    #[test]
    fn test_add_adjustment_validates_input() {
        let mut run = run(PayrollStatus::Draft);
        let result = run.add_adjustment(new_adjustment(AdjustmentType::Addition, "-1", 5));
        assert!(matches!(result, Err(EngineError::Validation { .. })));
        assert!(run.item("item_001").unwrap().adjustments.is_empty());
    }

    #[test]
    fn test_add_adjustment_unknown_item() {
        let mut run = run(PayrollStatus::Draft);
        let mut adjustment = new_adjustment(AdjustmentType::Addition, "10", 5);
        adjustment.payroll_item_id = "item_999".to_string();
        match run.add_adjustment(adjustment) {
            Err(EngineError::PayrollItemNotFound { id }) => assert_eq!(id, "item_999"),
            other => panic!("Expected PayrollItemNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_remove_unknown_adjustment() {
        let mut run = run(PayrollStatus::Draft);
        assert!(matches!(
            run.remove_adjustment("missing"),
            Err(EngineError::AdjustmentNotFound { .. })
        ));
    }

    #[test]
    fn test_adjustments_by_date_sorts_oldest_first() {
        let mut run = run(PayrollStatus::Draft);
        run.add_adjustment(new_adjustment(AdjustmentType::Addition, "1", 20))
            .unwrap();
        run.add_adjustment(new_adjustment(AdjustmentType::Addition, "2", 2))
            .unwrap();
        run.add_adjustment(new_adjustment(AdjustmentType::Addition, "3", 11))
            .unwrap();

        let mut undated = run.items[0].adjustments[0].clone();
        undated.id = "adj_undated".to_string();
        undated.date = None;
        run.items[0].adjustments.insert(0, undated);

        let days: Vec<Option<NaiveDate>> = run
            .item("item_001")
            .unwrap()
            .adjustments_by_date()
            .iter()
            .map(|a| a.date)
            .collect();
        assert_eq!(
            days,
            vec![Some(date(2)), Some(date(11)), Some(date(20)), None]
        );
    }

    /// PS-004: regeneration carries adjustments and keeps the status
    #[test]
    fn test_regenerate_carries_adjustments_by_employee() {
        let mut run = run(PayrollStatus::Generated);
        run.add_adjustment(new_adjustment(AdjustmentType::Deduction, "1000", 4))
            .unwrap();

        let fresh = vec![
            item("item_101", "emp_001", "21000"),
            item("item_102", "emp_002", "15000"),
        ];
        run.regenerate(fresh).unwrap();

        assert_eq!(run.status, PayrollStatus::Generated);
        let carried = run.item_for_employee("emp_001").unwrap();
        assert_eq!(carried.id, "item_101");
        assert_eq!(carried.adjustments.len(), 1);
        assert_eq!(carried.adjustments[0].payroll_item_id, "item_101");
        assert_eq!(carried.net_pay, dec("20000"));

        let new_hire = run.item_for_employee("emp_002").unwrap();
        assert_eq!(new_hire.net_pay, dec("15000"));
        assert_eq!(run.total_net_pay(), dec("35000"));
    }

    /// PS-005: regeneration never moves the status
    #[test]
    fn test_regenerate_leaves_draft_and_generated_in_place() {
        for status in [PayrollStatus::Draft, PayrollStatus::Generated] {
            let mut run = run(status);
            run.regenerate(vec![item("item_201", "emp_001", "22000")])
                .unwrap();
            assert_eq!(run.status, status);
        }

        let mut run = run(PayrollStatus::Generated);
        run.regenerate(vec![]).unwrap();
        assert!(matches!(
            run.advance_to(PayrollStatus::Draft),
            Err(EngineError::InvalidStatusTransition { .. })
        ));
        assert!(run.advance_to(PayrollStatus::Paid).is_ok());
    }

    #[test]
    fn test_deserialize_backend_run_with_string_money() {
        let json = r#"{
            "id": "run_001",
            "month": 1,
            "year": 2026,
            "status": "GENERATED",
            "items": [{
                "id": "item_001",
                "employeeId": "emp_001",
                "employee": {"id": "emp_001", "firstName": "Asha", "lastName": null, "email": "a@example.com", "department": {"id": "d1", "name": "Ops"}},
                "monthlySalary": "26000.00",
                "presentDays": "24",
                "otHours": "5",
                "basicPay": "13000",
                "hra": "6500",
                "allowance": "6500",
                "regularPay": "24000.00",
                "otPay": "937.50",
                "grossPay": "24937.50",
                "adjustmentTotal": "0",
                "netPay": "24937.50",
                "adjustments": []
            }]
        }"#;

        let run: PayrollRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.status, PayrollStatus::Generated);
        let item = &run.items[0];
        assert_eq!(item.ot_pay, dec("937.50"));
        assert_eq!(item.employee.as_ref().unwrap().full_name(), "Asha");
    }

    #[test]
    fn test_deserialize_payslip() {
        let json = r#"{
            "id": "item_001",
            "payrollRun": {"month": 1, "year": 2026, "status": "PAID"},
            "employee": {"firstName": "Asha", "lastName": "Rao", "email": "a@example.com", "hireDate": "2025-06-01T00:00:00.000Z", "role": {"title": "Engineer"}},
            "monthlySalary": 26000,
            "presentDays": 26,
            "otHours": 0,
            "regularPay": "20000",
            "otPay": 0,
            "grossPay": "20000",
            "adjustmentTotal": "300",
            "netPay": "20300",
            "adjustments": [
                {"id": "a1", "payrollItemId": "item_001", "date": "2026-01-05", "type": "ADDITION", "amount": "500", "reason": "Bonus"},
                {"id": "a2", "payrollItemId": "item_001", "date": "2026-01-06", "type": "DEDUCTION", "amount": 200, "reason": "Advance"}
            ]
        }"#;

        let payslip: Payslip = serde_json::from_str(json).unwrap();
        assert_eq!(payslip.payroll_run.status, PayrollStatus::Paid);
        assert_eq!(payslip.item.id, "item_001");
        assert_eq!(payslip.item.adjustments.len(), 2);
        let employee = payslip.item.employee.as_ref().unwrap();
        assert_eq!(employee.full_name(), "Asha Rao");
        assert_eq!(employee.hire_date, NaiveDate::from_ymd_opt(2025, 6, 1));
    }
}
