//! Parsing of monetary amounts and quantities coming from user input.
//!
//! The engine carries every amount as a full-precision `f64`. Monthly
//! amortization is `amount / duration` and must not be rounded, so the integer
//! minor-unit representation used for ledgers does not fit here. Rounding to a
//! currency's precision is left to the presentation layer.

use crate::{EngineError, ResultEngine};

/// Parses a non-negative decimal amount.
///
/// Accepts `.` or `,` as decimal separator, an optional leading `+` and
/// grouping spaces (`"100 000"`, including non-breaking ones).
///
/// # Examples
///
/// ```rust
/// use cost_engine::parse_amount;
///
/// assert_eq!(parse_amount("10").unwrap(), 10.0);
/// assert_eq!(parse_amount("10,5").unwrap(), 10.5);
/// assert_eq!(parse_amount("360 000").unwrap(), 360_000.0);
/// assert!(parse_amount("-1").is_err());
/// ```
pub fn parse_amount(s: &str) -> ResultEngine<f64> {
    parse_non_negative(s).map_err(EngineError::InvalidAmount)
}

/// Parses a non-negative quantity (kilograms sold, animal weight).
///
/// Same syntax as [`parse_amount`].
pub fn parse_quantity(s: &str) -> ResultEngine<f64> {
    parse_non_negative(s).map_err(EngineError::InvalidQuantity)
}

/// Returns `true` if `value` can take part in an aggregation.
pub(crate) fn is_usable(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn parse_non_negative(s: &str) -> Result<f64, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("empty value".to_string());
    }

    if trimmed.starts_with('-') {
        return Err(format!("'{trimmed}' must not be negative"));
    }
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let compact: String = rest
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if compact.is_empty() {
        return Err("empty value".to_string());
    }

    let mut parts = compact.split('.');
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next();
    if parts.next().is_some() {
        return Err(format!("'{trimmed}' has more than one decimal separator"));
    }

    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if integer.is_empty() || !all_digits(integer) || !fraction.map_or(true, all_digits) {
        return Err(format!("'{trimmed}' is not a number"));
    }

    let value: f64 = compact
        .parse()
        .map_err(|_| format!("'{trimmed}' is not a number"))?;
    if !value.is_finite() {
        return Err(format!("'{trimmed}' is too large"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!(parse_amount("10").unwrap(), 10.0);
        assert_eq!(parse_amount("10.5").unwrap(), 10.5);
        assert_eq!(parse_amount("10,50").unwrap(), 10.5);
        assert_eq!(parse_amount("+1.00").unwrap(), 1.0);
        assert_eq!(parse_amount("  2.30 ").unwrap(), 2.3);
        assert_eq!(parse_amount("10.").unwrap(), 10.0);
    }

    #[test]
    fn parse_keeps_full_precision() {
        assert_eq!(parse_amount("0.333333").unwrap(), 0.333333);
    }

    #[test]
    fn parse_strips_grouping_spaces() {
        assert_eq!(parse_amount("1 250 000").unwrap(), 1_250_000.0);
        assert_eq!(parse_amount("1\u{a0}250").unwrap(), 1_250.0);
    }

    #[test]
    fn parse_rejects_negative_and_garbage() {
        assert!(matches!(
            parse_amount("-5"),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(parse_amount("").is_err());
        assert!(parse_amount("12.3.4").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount(".5").is_err());
        assert!(parse_amount("1e3").is_err());
    }

    #[test]
    fn quantity_errors_are_labelled() {
        assert!(matches!(
            parse_quantity("kg"),
            Err(EngineError::InvalidQuantity(_))
        ));
        assert_eq!(parse_quantity("82,5").unwrap(), 82.5);
    }

    #[test]
    fn usable_rejects_negative_and_non_finite() {
        assert!(is_usable(0.0));
        assert!(is_usable(12.5));
        assert!(!is_usable(-0.01));
        assert!(!is_usable(f64::NAN));
        assert!(!is_usable(f64::INFINITY));
    }
}
