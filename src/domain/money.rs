use std::fmt;

use serde::{Deserialize, Deserializer, Serializer};

/// Money is represented as integer cents to avoid floating-point drift when
/// summing many entries. $4.50 = 450 cents.
pub type Cents = i64;

/// Largest magnitude a single amount may have: $10 trillion.
///
/// Stored amounts are JSON decimal numbers (`f64`). Below this bound every
/// cent value converts to units and back without loss.
pub const MAX_AMOUNT: Cents = 1_000_000_000_000_000;

/// Format cents as a plain decimal string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Format cents with an explicit direction sign and a currency symbol.
/// Example: 200000 -> "+$2000.00", -450 -> "-$4.50"
pub fn format_signed_amount(cents: Cents) -> String {
    let sign = if cents >= 0 { '+' } else { '-' };
    format!("{}${}", sign, format_cents(cents.abs()))
}

/// Parse a decimal string into cents.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, input) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let (units_str, decimal_str) = match input.split_once('.') {
        Some((units, decimals)) => (units, Some(decimals)),
        None => (input, None),
    };

    if units_str.is_empty() && decimal_str.is_none_or(str::is_empty) {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        if !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseCentsError::InvalidFormat);
        }
        units_str.parse().map_err(|_| ParseCentsError::Overflow)?
    };

    let decimal_cents: i64 = match decimal_str {
        None => 0,
        Some(digits) => {
            if !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(ParseCentsError::InvalidFormat);
            }
            match digits.len() {
                0 => 0,
                // "5" after the point means 50 cents
                1 => digits.parse::<i64>().map_err(|_| ParseCentsError::InvalidFormat)? * 10,
                // Anything past two places is truncated
                _ => digits[..2]
                    .parse()
                    .map_err(|_| ParseCentsError::InvalidFormat)?,
            }
        }
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or(ParseCentsError::Overflow)?;
    Ok(if negative { -cents } else { cents })
}

/// Convert a floating-point decimal amount (as found in stored JSON) to cents,
/// rounding to the nearest cent. Returns `None` for NaN, infinities and values
/// outside the `Cents` range.
pub fn cents_from_f64(value: f64) -> Option<Cents> {
    if !value.is_finite() {
        return None;
    }
    let scaled = (value * 100.0).round();
    if scaled.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(scaled as Cents)
}

/// Convert cents to the decimal number written to stored JSON.
pub fn cents_to_f64(cents: Cents) -> f64 {
    cents as f64 / 100.0
}

/// Serde adapter storing `Cents` as a JSON decimal number (`-4.5`), the shape
/// the `transactions` key has always used.
pub mod decimal_amount {
    use super::*;

    pub fn serialize<S: Serializer>(cents: &Cents, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(cents_to_f64(*cents))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Cents, D::Error> {
        let value = f64::deserialize(deserializer)?;
        cents_from_f64(value)
            .ok_or_else(|| serde::de::Error::custom(format!("amount out of range: {}", value)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    Overflow,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::Overflow => write!(f, "amount too large"),
        }
    }
}

impl std::error::Error for ParseCentsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(5000), "50.00");
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(1), "0.01");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-450), "-4.50");
        assert_eq!(format_cents(-1), "-0.01");
    }

    #[test]
    fn test_format_signed_amount() {
        assert_eq!(format_signed_amount(200000), "+$2000.00");
        assert_eq!(format_signed_amount(-450), "-$4.50");
        assert_eq!(format_signed_amount(0), "+$0.00");
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("4.50"), Ok(450));
        assert_eq!(parse_cents("2000"), Ok(200000));
        assert_eq!(parse_cents("12.5"), Ok(1250));
        assert_eq!(parse_cents(".50"), Ok(50));
        assert_eq!(parse_cents("7."), Ok(700));
        assert_eq!(parse_cents("-50.00"), Ok(-5000));
        assert_eq!(parse_cents(" 3.999 "), Ok(399)); // Truncates
    }

    #[test]
    fn test_parse_cents_invalid() {
        assert_eq!(parse_cents("abc"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("12.34.56"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents(""), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("."), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("1.é5"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("--5"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("-"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(
            parse_cents("99999999999999999999"),
            Err(ParseCentsError::Overflow)
        );
    }

    #[test]
    fn test_cents_from_f64() {
        assert_eq!(cents_from_f64(-4.5), Some(-450));
        assert_eq!(cents_from_f64(0.1 + 0.2), Some(30));
        assert_eq!(cents_from_f64(2000.0), Some(200000));
        assert_eq!(cents_from_f64(f64::NAN), None);
        assert_eq!(cents_from_f64(f64::INFINITY), None);
        assert_eq!(cents_from_f64(1e300), None);
    }

    #[test]
    fn test_amounts_up_to_the_limit_survive_decimal_storage() {
        let samples = [
            MAX_AMOUNT,
            MAX_AMOUNT - 1,
            MAX_AMOUNT - 99,
            999_999_999_999_901,
            123_456_789_012_345,
            900_719_925_474_099,
            1,
        ];
        for cents in samples {
            assert_eq!(cents_from_f64(cents_to_f64(cents)), Some(cents));
            assert_eq!(cents_from_f64(cents_to_f64(-cents)), Some(-cents));
        }
    }
}
