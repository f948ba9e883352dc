//! On-chain amount handling.
//!
//! Amounts are carried as `U256` in the smallest on-chain unit (planck).
//! RPC nodes and callers are inconsistent about how they encode them, so the
//! parsers here accept JSON numbers, decimal strings and `0x`-prefixed hex
//! strings. Serialization always emits a decimal string so large values
//! survive JSON consumers that use floating point numbers.

use alloy::primitives::U256;
use serde_json::Value;
use thiserror::Error;

/// Errors produced while interpreting an amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,

    #[error("invalid amount '{0}'")]
    Invalid(String),

    /// JSON value of a type that cannot hold an amount (bool, array, float...).
    #[error("unsupported amount value: {0}")]
    Unsupported(String),
}

/// Parse a decimal or `0x` hex string.
pub fn parse_amount_str(raw: &str) -> Result<U256, AmountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some("") => return Err(AmountError::Invalid(raw.to_string())),
        Some(hex) => U256::from_str_radix(hex, 16),
        None => U256::from_str_radix(trimmed, 10),
    };

    parsed.map_err(|_| AmountError::Invalid(raw.to_string()))
}

/// Parse an amount out of an arbitrary JSON value.
///
/// `null` is rejected here; callers that treat a missing field as zero do so
/// before calling.
pub fn parse_amount_value(value: &Value) -> Result<U256, AmountError> {
    match value {
        Value::String(s) => parse_amount_str(s),
        // Numbers keep their source text (serde_json `arbitrary_precision`),
        // so integers past u64 parse exactly; negatives and floats are rejected.
        Value::Number(n) => match n.as_u64() {
            Some(small) => Ok(U256::from(small)),
            None => parse_amount_str(&n.to_string()),
        },
        other => Err(AmountError::Unsupported(other.to_string())),
    }
}

/// Render `amount / 10^decimals` with two fractional digits, rounding half up.
pub fn format_units(amount: U256, decimals: u8) -> String {
    // 10^78 no longer fits; any U256 amount rounds to zero at that scale.
    let Some(divisor) = U256::from(10u64).checked_pow(U256::from(decimals)) else {
        return "0.00".to_string();
    };

    let mut whole = amount / divisor;
    let remainder = amount % divisor;

    let mut cents = if decimals >= 2 {
        // One cent is 10^(decimals - 2) planck.
        let cent = divisor / U256::from(100u64);
        let mut cents = remainder / cent;
        if (remainder % cent) * U256::from(2u64) >= cent {
            cents += U256::from(1u64);
        }
        cents
    } else {
        remainder * U256::from(100u64) / divisor
    };

    if cents >= U256::from(100u64) {
        whole = whole.saturating_add(U256::from(1u64));
        cents -= U256::from(100u64);
    }

    format!("{}.{:02}", whole, cents.to::<u64>())
}

/// Serde adapter: decimal string out, number / decimal / hex in.
pub mod serde_decimal {
    use super::{parse_amount_value, U256};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(amount: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(amount)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        parse_amount_value(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_decimal_and_hex() {
        assert_eq!(parse_amount_str("100000000000").unwrap(), U256::from(100_000_000_000u64));
        assert_eq!(parse_amount_str(" 42 ").unwrap(), U256::from(42u64));
        assert_eq!(parse_amount_str("0x2a").unwrap(), U256::from(42u64));
        assert_eq!(parse_amount_str("0X2A").unwrap(), U256::from(42u64));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_amount_str(""), Err(AmountError::Empty));
        assert!(matches!(parse_amount_str("12abc"), Err(AmountError::Invalid(_))));
        assert!(matches!(parse_amount_str("-5"), Err(AmountError::Invalid(_))));
        assert!(matches!(parse_amount_str("0x"), Err(AmountError::Invalid(_))));
    }

    #[test]
    fn test_parse_json_values() {
        assert_eq!(parse_amount_value(&json!(100)).unwrap(), U256::from(100u64));
        assert_eq!(parse_amount_value(&json!("100")).unwrap(), U256::from(100u64));
        assert!(parse_amount_value(&json!(-1)).is_err());
        assert!(parse_amount_value(&json!(1.5)).is_err());
        assert!(parse_amount_value(&json!(u64::MAX)).is_ok());
        assert!(matches!(
            parse_amount_value(&json!(true)),
            Err(AmountError::Unsupported(_))
        ));
    }

    #[test]
    fn test_json_numbers_beyond_u64() {
        let value: Value = serde_json::from_str("20000000000000000000").unwrap();
        assert_eq!(
            parse_amount_value(&value).unwrap(),
            U256::from(20_000_000_000_000_000_000u128)
        );

        let huge: Value = serde_json::from_str("340282366920938463463374607431768211456").unwrap();
        assert_eq!(parse_amount_value(&huge).unwrap().to_string(), "340282366920938463463374607431768211456");
    }

    #[test]
    fn test_amounts_beyond_u128() {
        let big = "340282366920938463463374607431768211456"; // 2^128
        let parsed = parse_amount_str(big).unwrap();
        assert_eq!(parsed.to_string(), big);
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(U256::from(5_000_000_000_000u64), 10), "500.00");
        assert_eq!(format_units(U256::from(10_000_000_000_000u64), 10), "1000.00");
        assert_eq!(format_units(U256::from(12_345u64), 2), "123.45");
        assert_eq!(format_units(U256::ZERO, 12), "0.00");
        assert_eq!(format_units(U256::from(7u64), 0), "7.00");
    }

    #[test]
    fn test_format_units_keeps_full_range() {
        assert_eq!(
            format_units(U256::MAX, 10),
            "11579208923731619542357098500868790785326998466564056403945758400791.31"
        );
        assert_eq!(format_units(U256::MAX, 0), format!("{}.00", U256::MAX));
        assert_eq!(format_units(U256::from(1u64), 77), "0.00");
        assert_eq!(format_units(U256::MAX, 78), "0.00");
    }

    #[test]
    fn test_format_units_rounding_carries() {
        assert_eq!(format_units(U256::from(19_995u64), 4), "2.00");
        assert_eq!(format_units(U256::from(999_999_999_999u64), 10), "100.00");
    }

    #[test]
    fn test_format_units_rounds_half_up() {
        // 1.005 with 3 decimals
        assert_eq!(format_units(U256::from(1_005u64), 3), "1.01");
        assert_eq!(format_units(U256::from(1_004u64), 3), "1.00");
    }

    #[test]
    fn test_serde_decimal() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "super::serde_decimal")]
            amount: U256,
        }

        let w: Wrapper = serde_json::from_value(json!({ "amount": "0x10" })).unwrap();
        assert_eq!(w.amount, U256::from(16u64));
        assert_eq!(serde_json::to_value(&w).unwrap(), json!({ "amount": "16" }));

        let bad: Result<Wrapper, _> = serde_json::from_value(json!({ "amount": "ten" }));
        assert!(bad.is_err());
    }
}
