//! Currency rounding and lenient numeric coercion.
//!
//! The admin backend transmits amounts as JSON numbers or numeric strings,
//! and older rows may carry garbage. Every numeric field read from the wire
//! goes through [`coerce_decimal`] so that a bad value becomes zero instead
//! of failing the whole payload.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Rounds a currency amount to 2 decimal places, half away from zero.
///
/// # Example
///
/// ```
/// use payroll_engine::models::round2;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round2(Decimal::from_str("187.505").unwrap()), Decimal::from_str("187.51").unwrap());
/// assert_eq!(round2(Decimal::from_str("961.5384615").unwrap()), Decimal::from_str("961.54").unwrap());
/// ```
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Coerces an arbitrary JSON value into a decimal.
///
/// Numbers and numeric strings (including scientific notation) parse;
/// everything else, including `null`, booleans, `"NaN"` and empty strings,
/// becomes zero.
///
/// # Example
///
/// ```
/// use payroll_engine::models::coerce_decimal;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// assert_eq!(coerce_decimal(&json!("1200.50")), Decimal::new(120050, 2));
/// assert_eq!(coerce_decimal(&json!(42)), Decimal::from(42));
/// assert_eq!(coerce_decimal(&json!("abc")), Decimal::ZERO);
/// assert_eq!(coerce_decimal(&json!(null)), Decimal::ZERO);
/// ```
pub fn coerce_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => Decimal::ZERO,
    }
}

/// Coerces a JSON value into a non-negative whole count (days).
///
/// Fractions are truncated, negatives and garbage become zero.
pub fn coerce_count(value: &Value) -> u32 {
    let decimal = coerce_decimal(value).trunc();
    if decimal.is_sign_negative() {
        return 0;
    }
    decimal.to_u32().unwrap_or(0)
}

fn parse_decimal(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

/// Serde `deserialize_with` helper for lenient decimal fields.
///
/// Use together with `#[serde(default)]` so a missing field is also zero.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_decimal(&value))
}

/// Serde `deserialize_with` helper for optional lenient decimal fields.
///
/// `null` stays `None`; any other value is coerced.
pub fn lenient_decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(coerce_decimal(&v)),
    })
}

/// Serde `deserialize_with` helper for lenient whole-day counts.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_count(&value))
}
