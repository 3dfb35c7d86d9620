//! Currency text handling.
//!
//! Rule extraction preserves matched currency text verbatim (for example
//! `"$1,250"`). Every component that needs the numeric value goes through
//! [`parse_currency`] so the string-to-number conversion lives in one place.
//!
//! Extraction patterns match any Unicode decimal digit, so matched text may
//! carry fullwidth or Arabic-Indic digits. [`ascii_digits`] folds those to
//! ASCII before conversion.

use std::borrow::Cow;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Parses a currency string into a decimal amount.
///
/// Strips the `$` symbol, thousands separators and surrounding whitespace
/// before conversion. Fails with [`EngineError::MalformedAmount`] if the
/// remainder is empty or not numeric.
///
/// # Examples
///
/// ```
/// use impact_engine::money::parse_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_currency("$1,250").unwrap(), Decimal::new(1250, 0));
/// assert!(parse_currency("$,").is_err());
/// ```
pub fn parse_currency(raw: &str) -> EngineResult<Decimal> {
    let cleaned: String = ascii_digits(raw.trim())
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Err(EngineError::MalformedAmount {
            raw: raw.to_string(),
        });
    }

    Decimal::from_str(cleaned).map_err(|_| EngineError::MalformedAmount {
        raw: raw.to_string(),
    })
}

static DECIMAL_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("Invalid regex"));

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// The value of a Unicode decimal digit.
fn digit_value(c: char) -> Option<u32> {
    if c.is_ascii() {
        return c.to_digit(10);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    // Decimal digit sets are contiguous runs of ten, each starting at zero.
    let mut first = c as u32;
    while let Some(prev) = first.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        first -= 1;
    }
    Some((c as u32 - first) % 10)
}

/// Replaces every Unicode decimal digit in `raw` with its ASCII equivalent.
///
/// # Examples
///
/// ```
/// use impact_engine::money::ascii_digits;
///
/// assert_eq!(ascii_digits("１,２５０"), "1,250");
/// assert_eq!(ascii_digits("٢.٥"), "2.5");
/// assert_eq!(ascii_digits("$300"), "$300");
/// ```
pub fn ascii_digits(raw: &str) -> Cow<'_, str> {
    if raw.is_ascii() {
        return Cow::Borrowed(raw);
    }
    Cow::Owned(
        raw.chars()
            .map(|c| {
                digit_value(c)
                    .and_then(|d| char::from_digit(d, 10))
                    .unwrap_or(c)
            })
            .collect(),
    )
}

/// Formats an amount as whole dollars with thousands separators, e.g. `$3,200`.
pub fn format_whole_dollars(amount: Decimal) -> String {
    let rounded = amount.round_dp(0).abs().normalize().to_string();
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, c) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount.round_dp(0) < Decimal::ZERO {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
