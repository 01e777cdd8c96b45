//! Monetary amounts and parsing of user-entered amount text.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Monetary amount. Exact decimal arithmetic, no float rounding drift.
pub type Amount = Decimal;

/// Parse amount text as typed into a form field.
///
/// Surrounding whitespace is ignored and a single `,` is accepted as the
/// decimal separator. Returns `None` for empty or unparsable text; the sign
/// is not checked here.
///
/// ```
/// use invoice_ledger::money::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount(" 12.50 "), Some(Decimal::new(1250, 2)));
/// assert_eq!(parse_amount("12,5"), Some(Decimal::new(125, 1)));
/// assert_eq!(parse_amount("abc"), None);
/// ```
pub fn parse_amount(text: &str) -> Option<Amount> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        trimmed.replacen(',', ".", 1)
    };

    Decimal::from_str(&normalized).ok()
}

/// Parse amount text, mapping anything unparsable to zero.
///
/// Zero is never a valid payment, so the result feeds straight into the
/// ledger's positive-amount check.
pub fn parse_amount_or_zero(text: &str) -> Amount {
    parse_amount(text).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain_amount() {
        assert_eq!(parse_amount("100"), Some(dec!(100)));
        assert_eq!(parse_amount("0.75"), Some(dec!(0.75)));
    }

    #[test]
    fn test_parse_comma_separator() {
        assert_eq!(parse_amount("3,66"), Some(dec!(3.66)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("12abc"), None);
        assert_eq!(parse_amount("1,2,3"), None);
    }

    #[test]
    fn test_parse_keeps_sign() {
        assert_eq!(parse_amount("-5"), Some(dec!(-5)));
    }

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(parse_amount_or_zero("nope"), Decimal::ZERO);
        assert_eq!(parse_amount_or_zero("42"), dec!(42));
    }
}
