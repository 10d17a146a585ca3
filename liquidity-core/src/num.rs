//! Arbitrary-precision numerics. Everything consensus-visible is an exact integer or an exact
//! rational, so every node rounds identically.

use num_bigint::{BigInt, BigUint, Sign};
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};

/// Absolute price in market decimals.
pub type Price = BigUint;

/// Exact decimal quantity (fees, factors, probabilities).
pub type Decimal = BigRational;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDecimalError {
    #[error("empty numeric literal")]
    Empty,
    #[error("malformed numeric literal `{0}`")]
    Malformed(String),
}

/// Parse a plain decimal literal such as `"12"`, `"0.05"` or `"-.5"` into an exact rational.
pub fn parse_decimal(literal: &str) -> Result<Decimal, ParseDecimalError> {
    let trimmed = literal.trim();
    if trimmed.is_empty() {
        return Err(ParseDecimalError::Empty);
    }
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let well_formed = !(int_part.is_empty() && frac_part.is_empty())
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(ParseDecimalError::Malformed(literal.to_owned()));
    }
    let digits = format!("{}{}", int_part, frac_part);
    let numer = BigInt::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| ParseDecimalError::Malformed(literal.to_owned()))?;
    let denom = num_traits::pow(BigInt::from(10u8), frac_part.len());
    let value = BigRational::new(numer, denom);
    Ok(if negative { -value } else { value })
}

/// Parse an unsigned integer literal.
pub fn parse_uint(literal: &str) -> Result<BigUint, ParseDecimalError> {
    let trimmed = literal.trim();
    if trimmed.is_empty() {
        return Err(ParseDecimalError::Empty);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseDecimalError::Malformed(literal.to_owned()));
    }
    BigUint::parse_bytes(trimmed.as_bytes(), 10).ok_or_else(|| ParseDecimalError::Malformed(literal.to_owned()))
}

pub fn to_decimal(value: &BigUint) -> Decimal {
    BigRational::from_integer(BigInt::from_biguint(Sign::Plus, value.clone()))
}

pub fn u64_to_decimal(value: u64) -> Decimal {
    BigRational::from_integer(BigInt::from(value))
}

/// Truncates toward zero. Negative values map to zero, `None` when the result exceeds `u64::MAX`.
pub fn truncate_to_u64(value: &Decimal) -> Option<u64> {
    if value.is_negative() {
        return Some(0);
    }
    value.to_integer().to_u64()
}

/// `value` limited to the closed interval `[lo, hi]`.
pub fn clamp(value: Decimal, lo: &Decimal, hi: &Decimal) -> Decimal {
    if value < *lo {
        lo.clone()
    } else if value > *hi {
        hi.clone()
    } else {
        value
    }
}

/// Human-readable decimal rendering for logs; exact when the denominator divides a power of ten.
pub fn display_decimal(value: &Decimal) -> String {
    let mut scale = 0usize;
    let mut scaled = value.clone();
    while !scaled.is_integer() && scale < 18 {
        scaled *= BigRational::from_integer(BigInt::from(10u8));
        scale += 1;
    }
    if !scaled.is_integer() {
        return format!("{}", value);
    }
    let digits = scaled.to_integer().abs().to_string();
    let sign = if value.is_negative() { "-" } else { "" };
    if scale == 0 {
        return format!("{}{}", sign, digits);
    }
    let padded = format!("{:0>width$}", digits, width = scale + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - scale);
    format!("{}{}.{}", sign, int_part, frac_part)
}

/// Serde adapters for human-edited inputs (configs, block logs) where numbers come as strings.
pub mod serde_str {
    use num_bigint::BigUint;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    use crate::num::{parse_decimal, parse_uint, Decimal};

    pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let literal = String::deserialize(deserializer)?;
        parse_decimal(&literal).map_err(D::Error::custom)
    }

    pub fn uint<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let literal = String::deserialize(deserializer)?;
        parse_uint(&literal).map_err(D::Error::custom)
    }
}
