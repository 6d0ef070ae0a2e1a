//! Property-based tests for salary breakup arithmetic.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::breakup::{breakup_salary, PROFESSIONAL_TAX};

/// Gross salaries in whole paise up to Rs. 10 crore.
fn gross_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000_000_00).prop_map(|paise| Decimal::new(paise, 2))
}

proptest! {
    /// The earning shares sum to exactly 90% of gross; the 10% gap is the
    /// documented observed behavior.
    #[test]
    fn earnings_are_ninety_percent_of_gross(gross in gross_strategy()) {
        let b = breakup_salary(gross);

        prop_assert_eq!(b.basic + b.hra + b.special, gross * dec!(0.90));
        prop_assert_eq!(b.total_earnings, b.basic + b.hra + b.special);
    }

    /// Provident fund is 12% of basic, which is itself half of gross.
    #[test]
    fn pf_follows_basic(gross in gross_strategy()) {
        let b = breakup_salary(gross);

        prop_assert_eq!(b.pf, b.basic * dec!(0.12));
        prop_assert_eq!(b.basic, gross * dec!(0.50));
    }

    /// Net salary is always earnings minus deductions, and the deductions
    /// are PF plus the flat professional tax.
    #[test]
    fn net_is_earnings_minus_deductions(gross in gross_strategy()) {
        let b = breakup_salary(gross);

        prop_assert_eq!(b.total_deductions, b.pf + PROFESSIONAL_TAX);
        prop_assert_eq!(b.net_salary, b.total_earnings - b.total_deductions);
    }

    /// Non-negative gross never produces negative earning components.
    #[test]
    fn components_are_non_negative(gross in gross_strategy()) {
        let b = breakup_salary(gross);

        prop_assert!(b.basic >= Decimal::ZERO);
        prop_assert!(b.hra >= Decimal::ZERO);
        prop_assert!(b.special >= Decimal::ZERO);
        prop_assert!(b.pf >= Decimal::ZERO);
    }
}
