//! Gross-salary breakup calculation.
//!
//! All arithmetic is fixed-point decimal; no floating point anywhere.
//! Components are kept at full precision and only rounded when rendered
//! (see `format_currency`), so the documented identities hold exactly.

use rust_decimal::Decimal;
use serde::Serialize;

/// Monthly professional tax, a flat statutory amount.
pub const PROFESSIONAL_TAX: Decimal = Decimal::from_parts(20000, 0, 0, false, 2);

/// Basic pay share of gross: 50%.
const BASIC_RATE: Decimal = Decimal::from_parts(50, 0, 0, false, 2);
/// House rent allowance share of gross: 20%.
const HRA_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);
/// Special allowance share of gross: 20%.
const SPECIAL_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);
/// Provident fund share of basic: 12%.
const PF_RATE: Decimal = Decimal::from_parts(12, 0, 0, false, 2);

/// Structured decomposition of a gross salary into earnings and deductions.
///
/// Derived on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalaryBreakup {
    /// Basic pay (50% of gross).
    pub basic: Decimal,
    /// House rent allowance (20% of gross).
    pub hra: Decimal,
    /// Special allowance (20% of gross).
    pub special: Decimal,
    /// Provident fund contribution (12% of basic).
    pub pf: Decimal,
    /// Flat professional tax.
    pub professional_tax: Decimal,
    /// Sum of the earning components.
    pub total_earnings: Decimal,
    /// Sum of the deduction components.
    pub total_deductions: Decimal,
    /// Earnings minus deductions.
    pub net_salary: Decimal,
}

/// Partitions a gross salary into the fixed earnings/deductions breakdown.
///
/// Note that the earning shares sum to 90% of gross, not 100%; the remaining
/// 10% is unaccounted. That is the observed production behavior and is kept
/// as-is pending product confirmation.
///
/// Pure and deterministic; the caller is responsible for rejecting an absent
/// salary before getting here.
#[must_use]
pub fn breakup_salary(gross: Decimal) -> SalaryBreakup {
    let basic = gross * BASIC_RATE;
    let hra = gross * HRA_RATE;
    let special = gross * SPECIAL_RATE;
    let pf = basic * PF_RATE;

    let total_earnings = basic + hra + special;
    let total_deductions = pf + PROFESSIONAL_TAX;
    let net_salary = total_earnings - total_deductions;

    SalaryBreakup {
        basic,
        hra,
        special,
        pf,
        professional_tax: PROFESSIONAL_TAX,
        total_earnings,
        total_deductions,
        net_salary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_breakup_of_zero() {
        let b = breakup_salary(Decimal::ZERO);

        assert_eq!(b.basic, Decimal::ZERO);
        assert_eq!(b.hra, Decimal::ZERO);
        assert_eq!(b.special, Decimal::ZERO);
        assert_eq!(b.pf, Decimal::ZERO);
        assert_eq!(b.professional_tax, dec!(200.00));
        assert_eq!(b.total_earnings, Decimal::ZERO);
        assert_eq!(b.total_deductions, dec!(200.00));
        assert_eq!(b.net_salary, dec!(-200.00));
    }

    #[test]
    fn test_breakup_of_50000() {
        let b = breakup_salary(dec!(50000));

        assert_eq!(b.basic, dec!(25000.00));
        assert_eq!(b.hra, dec!(10000.00));
        assert_eq!(b.special, dec!(10000.00));
        assert_eq!(b.pf, dec!(3000.00));
        assert_eq!(b.professional_tax, dec!(200.00));
        assert_eq!(b.total_earnings, dec!(45000.00));
        assert_eq!(b.total_deductions, dec!(3200.00));
        assert_eq!(b.net_salary, dec!(41800.00));
    }

    #[test]
    fn test_professional_tax_constant() {
        assert_eq!(PROFESSIONAL_TAX, dec!(200.00));
    }

    #[test]
    fn test_idempotent_for_identical_input() {
        let gross = dec!(73210.55);
        assert_eq!(breakup_salary(gross), breakup_salary(gross));
    }
}
