//! Salary breakup arithmetic and currency formatting.

mod breakup;
mod format;

#[cfg(test)]
mod props;

pub use breakup::{breakup_salary, SalaryBreakup, PROFESSIONAL_TAX};
pub use format::format_currency;
