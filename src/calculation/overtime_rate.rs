//! Overtime rate resolution.
//!
//! An employee's overtime is paid either at a fixed rate per hour or at a
//! multiple of the hourly wage derived from their monthly salary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{OtType, OvertimePolicy, round2};

/// The resolved overtime rate with the wages it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeRate {
    /// The policy type that produced the rate.
    pub ot_type: OtType,
    /// Monthly salary divided by working days, rounded for display.
    pub per_day_wage: Decimal,
    /// Per-day wage divided by working hours, rounded for display.
    pub hourly_wage: Decimal,
    /// Overtime pay per hour, rounded to 2 decimals.
    pub rate: Decimal,
}

/// Divides, returning zero for a non-positive divisor or overflow.
pub(crate) fn safe_div(numerator: Decimal, divisor: Decimal) -> Decimal {
    if divisor <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    numerator.checked_div(divisor).unwrap_or(Decimal::ZERO)
}

/// Resolves the overtime rate per hour for an employee.
///
/// - FIXED: the configured rate per hour; a missing rate is 0.
/// - MULTIPLIER: hourly wage times the multiplier; a missing multiplier is 1.
///
/// The hourly wage is `monthly_salary / working_days / working_hours_per_day`,
/// where a non-positive divisor makes it 0. The rate is computed from the
/// unrounded hourly wage and then rounded to 2 decimals.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::resolve_overtime_rate;
/// use payroll_engine::models::OvertimePolicy;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rate = resolve_overtime_rate(
///     Decimal::from(26000),
///     Decimal::from(26),
///     Decimal::from(8),
///     &OvertimePolicy::Multiplier { multiplier: Some(Decimal::from_str("1.5").unwrap()) },
/// );
/// assert_eq!(rate.rate, Decimal::from_str("187.5").unwrap());
/// ```
pub fn resolve_overtime_rate(
    monthly_salary: Decimal,
    working_days: Decimal,
    working_hours_per_day: Decimal,
    policy: &OvertimePolicy,
) -> OvertimeRate {
    let per_day_wage = safe_div(monthly_salary, working_days);
    let hourly_wage = safe_div(per_day_wage, working_hours_per_day);

    let rate = match policy {
        OvertimePolicy::Fixed { rate_per_hour } => rate_per_hour.unwrap_or(Decimal::ZERO),
        OvertimePolicy::Multiplier { multiplier } => hourly_wage
            .checked_mul(multiplier.unwrap_or(Decimal::ONE))
            .unwrap_or(Decimal::ZERO),
    };

    OvertimeRate {
        ot_type: policy.ot_type(),
        per_day_wage: round2(per_day_wage),
        hourly_wage: round2(hourly_wage),
        rate: round2(rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn multiplier(m: &str) -> OvertimePolicy {
        OvertimePolicy::Multiplier {
            multiplier: Some(dec(m)),
        }
    }

    /// OT-001: 26000 over 26 days of 8 hours at 1.5x
    #[test]
    fn test_multiplier_rate() {
        let rate = resolve_overtime_rate(dec("26000"), dec("26"), dec("8"), &multiplier("1.5"));
        assert_eq!(rate.per_day_wage, dec("1000"));
        assert_eq!(rate.hourly_wage, dec("125"));
        assert_eq!(rate.rate, dec("187.5"));
        assert_eq!(rate.ot_type, OtType::Multiplier);
    }

    /// OT-002: fixed rate ignores wages
    #[test]
    fn test_fixed_rate() {
        let policy = OvertimePolicy::Fixed {
            rate_per_hour: Some(dec("150")),
        };
        let rate = resolve_overtime_rate(dec("26000"), dec("26"), dec("8"), &policy);
        assert_eq!(rate.rate, dec("150"));
        assert_eq!(rate.ot_type, OtType::Fixed);
    }

    /// OT-003: zero days or hours degrade to zero
    #[test]
    fn test_zero_divisors_degrade_to_zero() {
        let zero_days = resolve_overtime_rate(dec("26000"), Decimal::ZERO, dec("8"), &multiplier("1.5"));
        assert_eq!(zero_days.per_day_wage, Decimal::ZERO);
        assert_eq!(zero_days.rate, Decimal::ZERO);

        let zero_hours = resolve_overtime_rate(dec("26000"), dec("26"), Decimal::ZERO, &multiplier("1.5"));
        assert_eq!(zero_hours.per_day_wage, dec("1000"));
        assert_eq!(zero_hours.hourly_wage, Decimal::ZERO);
        assert_eq!(zero_hours.rate, Decimal::ZERO);

        let negative = resolve_overtime_rate(dec("26000"), dec("-26"), dec("8"), &multiplier("2"));
        assert_eq!(negative.rate, Decimal::ZERO);
    }

    #[test]
    fn test_missing_parameters_use_defaults() {
        let fixed = resolve_overtime_rate(
            dec("26000"),
            dec("26"),
            dec("8"),
            &OvertimePolicy::Fixed { rate_per_hour: None },
        );
        assert_eq!(fixed.rate, Decimal::ZERO);

        let multiplied = resolve_overtime_rate(
            dec("26000"),
            dec("26"),
            dec("8"),
            &OvertimePolicy::Multiplier { multiplier: None },
        );
        assert_eq!(multiplied.rate, dec("125"));
    }

    #[test]
    fn test_rate_uses_unrounded_hourly_wage() {
        // 25000 / 26 / 8 = 120.1923..., x1.5 = 180.288...
        let rate = resolve_overtime_rate(dec("25000"), dec("26"), dec("8"), &multiplier("1.5"));
        assert_eq!(rate.hourly_wage, dec("120.19"));
        assert_eq!(rate.rate, dec("180.29"));
    }

    #[test]
    fn test_overflow_degrades_to_zero() {
        let rate = resolve_overtime_rate(Decimal::MAX, dec("1"), dec("1"), &multiplier("10"));
        assert_eq!(rate.rate, Decimal::ZERO);
    }

    proptest! {
        #[test]
        fn prop_fixed_rate_independent_of_wages(
            salary in 0i64..10_000_000,
            days in -5i64..31,
            hours in -2i64..24,
            fixed in 0i64..100_000,
        ) {
            let policy = OvertimePolicy::Fixed { rate_per_hour: Some(Decimal::new(fixed, 2)) };
            let rate = resolve_overtime_rate(
                Decimal::from(salary),
                Decimal::from(days),
                Decimal::from(hours),
                &policy,
            );
            prop_assert_eq!(rate.rate, Decimal::new(fixed, 2));
        }

        #[test]
        fn prop_multiplier_rate_never_negative(
            salary in 0i64..10_000_000,
            days in -5i64..31,
            hours in -2i64..24,
            m in 0i64..500,
        ) {
            let policy = OvertimePolicy::Multiplier { multiplier: Some(Decimal::new(m, 2)) };
            let rate = resolve_overtime_rate(
                Decimal::from(salary),
                Decimal::from(days),
                Decimal::from(hours),
                &policy,
            );
            prop_assert!(rate.rate >= Decimal::ZERO);
        }
    }
}
