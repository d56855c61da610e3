//! Parsing of user-typed amounts and fees.

use crate::error::{ModelError, Result};

/// Parses an amount the way the wallet page reads its prompt and fee field.
///
/// Surrounding whitespace is ignored and a single leading `+` or `-` is
/// accepted. The value is the leading run of ASCII digits; anything after
/// it is ignored, so `"12abc"` parses as `12`. Negative values parse: the
/// node, not the wallet, decides whether an output is acceptable.
///
/// # Errors
///
/// Returns [`ModelError::InvalidAmount`] when there are no digits after the
/// optional sign, or when the value does not fit in an `i64`.
pub fn parse_amount(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];

    if digits.is_empty() {
        return Err(ModelError::InvalidAmount(input.to_string()));
    }

    // Parse with the sign attached so i64::MIN is reachable
    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    signed
        .parse::<i64>()
        .map_err(|_| ModelError::InvalidAmount(input.to_string()))
}
