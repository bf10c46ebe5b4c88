//! Estimate calculations: the totals engine and form validation.

pub mod totals;
pub mod validation;

pub use totals::{EstimateTotals, GrossMargin, TotalsEngine};
pub use validation::{ValidationReport, validate_form};
