//! Currency rendering for slips and API payloads.

use rust_decimal::Decimal;

/// Currency symbol used throughout the application.
const CURRENCY_SYMBOL: &str = "Rs.";

/// Formats an amount as `Rs. 1,234.56`: symbol prefix, two decimal places,
/// thousands separators. Negative amounts render as `Rs. -200.00`.
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let raw = format!("{rounded:.2}");

    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    // Group the integer digits in threes, right to left.
    let mut grouped: Vec<u8> = Vec::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, b) in int_part.bytes().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(b',');
        }
        grouped.push(b);
    }
    grouped.reverse();
    let int_grouped = String::from_utf8(grouped).unwrap_or_else(|_| int_part.to_string());

    format!("{CURRENCY_SYMBOL} {sign}{int_grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0), "Rs. 0.00")]
    #[case(dec!(200), "Rs. 200.00")]
    #[case(dec!(1234.5), "Rs. 1,234.50")]
    #[case(dec!(25000), "Rs. 25,000.00")]
    #[case(dec!(1234567.89), "Rs. 1,234,567.89")]
    #[case(dec!(-200), "Rs. -200.00")]
    #[case(dec!(999), "Rs. 999.00")]
    #[case(dec!(1000), "Rs. 1,000.00")]
    fn test_format_currency(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_currency(amount), expected);
    }

    #[test]
    fn test_rounds_to_two_places() {
        assert_eq!(format_currency(dec!(41800.005)), "Rs. 41,800.00");
        assert_eq!(format_currency(dec!(41800.015)), "Rs. 41,800.02");
    }
}
