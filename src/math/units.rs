//! Conversion between human-readable decimal strings and raw fixed-point token amounts.
//!
//! Amounts are handled as digit strings end to end, so any `decimals` value a token can
//! report is supported without computing `10^decimals`. Parsing truncates fractional
//! digits beyond the token precision (round down); it never rounds up.

use crate::errors::BalRsError;
use alloy_primitives::U256;

/// Fractional precision used when rounding amounts before proportional queries.
pub const DEFAULT_MAX_DECIMALS: u8 = 10;

/// The pieces of a validated decimal numeral, both made of ASCII digits only.
#[derive(Debug, PartialEq, Eq)]
struct DecimalParts<'a> {
    integer: &'a str,
    fraction: &'a str,
}

fn split_decimal(human: &str) -> Result<DecimalParts<'_>, BalRsError> {
    let trimmed = human.trim();
    if trimmed.is_empty() {
        return Err(BalRsError::invalid_amount(human, "empty amount"));
    }

    let (integer, fraction) = match trimmed.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (trimmed, ""),
    };

    if integer.is_empty() && fraction.is_empty() {
        return Err(BalRsError::invalid_amount(human, "no digits"));
    }
    if !integer.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(BalRsError::invalid_amount(
            human,
            "expected a non-negative decimal numeral",
        ));
    }

    Ok(DecimalParts { integer, fraction })
}

/// Parses `human` into a raw amount with `decimals` fractional digits.
///
/// # Examples
/// - `"1.5"`, decimals=6 -> 1_500_000
/// - `"0.1234567"`, decimals=6 -> 123_456 (excess digit dropped)
///
/// # Errors
///
/// Returns [`BalRsError::InvalidAmount`] when `human` is not a non-negative decimal numeral
/// or when the scaled value does not fit in 256 bits.
pub fn to_raw(human: &str, decimals: u8) -> Result<U256, BalRsError> {
    let parts = split_decimal(human)?;
    let precision = decimals as usize;

    let mut digits = String::with_capacity(parts.integer.len() + precision);
    digits.push_str(parts.integer);
    if parts.fraction.len() >= precision {
        digits.push_str(&parts.fraction[..precision]);
    } else {
        digits.push_str(parts.fraction);
        digits.extend(std::iter::repeat_n('0', precision - parts.fraction.len()));
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(significant, 10)
        .map_err(|e| BalRsError::invalid_amount(human, format!("does not fit in 256 bits: {e}")))
}

/// Formats a raw amount as a human decimal string.
///
/// # Examples
/// - amount=1_000_000_000_000_000_000, decimals=18 -> "1"
/// - amount=12345, decimals=6 -> "0.012345"
pub fn to_human(raw: U256, decimals: u8) -> String {
    let digits = raw.to_string();
    let precision = decimals as usize;
    if precision == 0 {
        return digits;
    }

    let padded = if digits.len() <= precision {
        let mut s = "0".repeat(precision + 1 - digits.len());
        s.push_str(&digits);
        s
    } else {
        digits
    };

    let (integer, fraction) = padded.split_at(padded.len() - precision);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{integer}.{fraction}")
    }
}

/// Canonical form of a decimal numeral: no leading integer zeros, no trailing fractional
/// zeros, no dangling dot.
pub fn normalize_human_amount(human: &str) -> Result<String, BalRsError> {
    let parts = split_decimal(human)?;
    let integer = parts.integer.trim_start_matches('0');
    let fraction = parts.fraction.trim_end_matches('0');

    let integer = if integer.is_empty() { "0" } else { integer };
    Ok(if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{integer}.{fraction}")
    })
}

/// True for an empty string or a numeral equal to zero. Malformed input is not "empty".
pub fn is_empty_human_amount(human: &str) -> bool {
    if human.trim().is_empty() {
        return true;
    }
    match split_decimal(human) {
        Ok(parts) => parts
            .integer
            .bytes()
            .chain(parts.fraction.bytes())
            .all(|b| b == b'0'),
        Err(_) => false,
    }
}

/// Renders `human` with exactly `max_decimals` fractional digits, rounding down.
pub fn round_down_to_fixed(human: &str, max_decimals: u8) -> Result<String, BalRsError> {
    let raw = to_raw(human, max_decimals)?;
    let digits = raw.to_string();
    let precision = max_decimals as usize;
    if precision == 0 {
        return Ok(digits);
    }

    let padded = if digits.len() <= precision {
        format!("{}{}", "0".repeat(precision + 1 - digits.len()), digits)
    } else {
        digits
    };
    let (integer, fraction) = padded.split_at(padded.len() - precision);
    Ok(format!("{integer}.{fraction}"))
}
