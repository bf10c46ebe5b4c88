//! Money rounding and formatting.
//!
//! The currency is modeled without a fractional minor unit: every displayed
//! amount is a whole number of yen. This module defines the single rounding
//! rule used everywhere else, the display formatting (thousands grouping,
//! optional `¥` prefix, `---` placeholder), and the fail-open coercion of
//! raw form input into amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol used by [`format_amount`].
pub const CURRENCY_SYMBOL: &str = "¥";

/// Placeholder rendered for amounts that have no representable value.
pub const AMOUNT_PLACEHOLDER: &str = "---";

/// Rounds an amount to the nearest whole currency unit, ties away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimate_core::money::round_amount;
///
/// assert_eq!(round_amount(dec!(1234.4)), dec!(1234));
/// assert_eq!(round_amount(dec!(1234.5)), dec!(1235));
/// assert_eq!(round_amount(dec!(-0.5)), dec!(-1)); // Away from zero
/// ```
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Strictly parses a raw field value as an amount.
///
/// Trims surrounding whitespace and removes commas (thousands separator).
/// Returns `None` for empty or unparseable input.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let normalized = raw.trim().replace(',', "");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse().ok()
}

/// Coerces a raw field value into an amount, degrading to zero.
///
/// A blank or garbage numeric field must not block calculation, so any
/// input [`parse_amount`] rejects becomes exactly `0`.
pub fn coerce_amount(raw: &str) -> Decimal {
    parse_amount(raw).unwrap_or(Decimal::ZERO)
}

/// Formats an amount as a rounded integer with thousands grouping.
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimate_core::money::format_amount;
///
/// assert_eq!(format_amount(dec!(1234.6), true), "¥1,235");
/// assert_eq!(format_amount(dec!(-5000), false), "-5,000");
/// ```
pub fn format_amount(
    value: Decimal,
    with_symbol: bool,
) -> String {
    let grouped = group_thousands(round_amount(value));
    if with_symbol {
        format!("{CURRENCY_SYMBOL}{grouped}")
    } else {
        grouped
    }
}

/// Formats an optional amount, rendering `None` as the placeholder.
///
/// This is the display path for values that may be unrepresentable
/// (an undefined margin, a snapshot field missing from an import).
/// It never fails: absent input yields `"---"` (or `"¥---"`), not an error.
pub fn format_optional_amount(
    value: Option<Decimal>,
    with_symbol: bool,
) -> String {
    match value {
        Some(v) => format_amount(v, with_symbol),
        None if with_symbol => format!("{CURRENCY_SYMBOL}{AMOUNT_PLACEHOLDER}"),
        None => AMOUNT_PLACEHOLDER.to_string(),
    }
}

/// Inserts comma separators into an already-rounded integral amount.
fn group_thousands(value: Decimal) -> String {
    let plain = value.normalize().to_string();
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_amount tests
    // =========================================================================

    #[test]
    fn round_amount_rounds_down_below_midpoint() {
        assert_eq!(round_amount(dec!(100.4)), dec!(100));
    }

    #[test]
    fn round_amount_rounds_up_at_midpoint() {
        assert_eq!(round_amount(dec!(100.5)), dec!(101));
    }

    #[test]
    fn round_amount_rounds_away_from_zero_for_negatives() {
        assert_eq!(round_amount(dec!(-100.5)), dec!(-101));
    }

    #[test]
    fn round_amount_preserves_integers() {
        assert_eq!(round_amount(dec!(2600)), dec!(2600));
    }

    // =========================================================================
    // parse_amount / coerce_amount tests
    // =========================================================================

    #[test]
    fn parse_amount_accepts_comma_thousands_separator() {
        assert_eq!(parse_amount("1,234.56"), Some(dec!(1234.56)));
    }

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("  42  "), Some(dec!(42)));
    }

    #[test]
    fn parse_amount_rejects_empty_and_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("12abc"), None);
    }

    #[test]
    fn coerce_amount_degrades_to_zero() {
        assert_eq!(coerce_amount(""), Decimal::ZERO);
        assert_eq!(coerce_amount("garbage"), Decimal::ZERO);
        assert_eq!(coerce_amount("1.5"), dec!(1.5));
        assert_eq!(coerce_amount("-300"), dec!(-300));
    }

    // =========================================================================
    // formatting tests
    // =========================================================================

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(dec!(1234567), false), "1,234,567");
        assert_eq!(format_amount(dec!(1000), true), "¥1,000");
        assert_eq!(format_amount(dec!(999), false), "999");
    }

    #[test]
    fn format_amount_rounds_before_grouping() {
        assert_eq!(format_amount(dec!(1234.6), false), "1,235");
    }

    #[test]
    fn format_amount_handles_zero_and_negatives() {
        assert_eq!(format_amount(dec!(0), true), "¥0");
        assert_eq!(format_amount(dec!(-1234567.5), false), "-1,234,568");
    }

    #[test]
    fn format_optional_amount_uses_placeholder() {
        assert_eq!(format_optional_amount(None, false), "---");
        assert_eq!(format_optional_amount(None, true), "¥---");
        assert_eq!(format_optional_amount(Some(dec!(2600)), true), "¥2,600");
    }
}
