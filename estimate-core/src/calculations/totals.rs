//! The totals engine: reduces an ordered line-item list into estimate totals.
//!
//! # Calculation rules
//!
//! | figure | rule |
//! |--------|------|
//! | raw subtotal | Σ line amount, unrounded |
//! | subtotal | `round(raw subtotal)` |
//! | tax | `round(subtotal × 10%)` — computed from the *rounded* subtotal |
//! | total | `subtotal + tax` |
//! | total cost | Σ line cost, unrounded |
//! | gross margin | see [`TotalsEngine::gross_margin`] |
//!
//! Tax is always derived from the rounded subtotal so that the displayed
//! subtotal plus the displayed tax equals the displayed total; deriving it
//! from the raw sum can drift by one yen.
//!
//! The engine is a pure transform: it owns no state, performs no I/O, and
//! never fails. Degenerate input (empty list, all-zero rows, negative
//! costs) produces a numeric result, never an error.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use estimate_core::calculations::TotalsEngine;
//! use estimate_core::models::LineItem;
//!
//! let items = vec![LineItem {
//!     no: 1,
//!     description: "基礎工事".to_string(),
//!     quantity: dec!(2),
//!     unit: "式".to_string(),
//!     unit_cost: dec!(1000),
//!     markup_rate: dec!(1.3),
//! }];
//!
//! let totals = TotalsEngine::default().calculate(&items);
//! assert_eq!(totals.subtotal, dec!(2600));
//! assert_eq!(totals.tax, dec!(260));
//! assert_eq!(totals.total, dec!(2860));
//! assert_eq!(totals.gross_margin.to_string(), "23.1%");
//! ```

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::LineItem;
use crate::money::round_amount;

/// Gross margin relative to the sale price.
///
/// The margin is undefined when cost exists but revenue is zero; that case
/// carries no number at all, so it is a distinct variant rather than a
/// magic value. Serialized untagged: a number for the finite case, `null`
/// for the undefined one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GrossMargin {
    Percent(Decimal),
    Undefined,
}

impl fmt::Display for GrossMargin {
    /// Finite margins render with one decimal place (`"23.1%"`); the
    /// undefined case renders as the literal `"---"`.
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            GrossMargin::Percent(p) => {
                let rounded =
                    p.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
                write!(f, "{rounded:.1}%")
            }
            GrossMargin::Undefined => f.write_str("---"),
        }
    }
}

/// Totals computed from a line-item list.
///
/// Ephemeral: created fresh on every calculation and superseded by the
/// next one, except when frozen into a saved estimate's snapshot.
/// `subtotal`, `tax` and `total` are whole currency units; `total_cost`
/// keeps the unrounded sum (rounding it is display's concern).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub total_cost: Decimal,
    pub gross_margin: GrossMargin,
}

impl Default for EstimateTotals {
    /// The all-zero totals of an empty estimate.
    fn default() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            gross_margin: GrossMargin::Percent(Decimal::ZERO),
        }
    }
}

/// Calculator reducing line items into [`EstimateTotals`].
#[derive(Debug, Clone)]
pub struct TotalsEngine {
    tax_rate: Decimal,
}

impl Default for TotalsEngine {
    /// Engine with the fixed 10% consumption tax rate.
    fn default() -> Self {
        Self::new(Decimal::new(10, 2))
    }
}

impl TotalsEngine {
    /// Creates an engine with an explicit tax rate (a fraction, not a
    /// percentage: `0.10` for 10%).
    pub fn new(tax_rate: Decimal) -> Self {
        Self { tax_rate }
    }

    /// Reduces the line-item sequence into totals.
    ///
    /// Pure and idempotent: the same input always yields the identical
    /// result, and nothing outside the return value is touched.
    pub fn calculate(
        &self,
        items: &[LineItem],
    ) -> EstimateTotals {
        let raw_subtotal: Decimal = items.iter().map(LineItem::amount).sum();
        let total_cost: Decimal = items.iter().map(LineItem::cost).sum();

        let subtotal = round_amount(raw_subtotal);
        let tax = self.tax(subtotal);

        EstimateTotals {
            subtotal,
            tax,
            total: subtotal + tax,
            total_cost,
            gross_margin: self.gross_margin(raw_subtotal, total_cost),
        }
    }

    /// Tax on the already-rounded subtotal, itself rounded.
    fn tax(
        &self,
        rounded_subtotal: Decimal,
    ) -> Decimal {
        round_amount(rounded_subtotal * self.tax_rate)
    }

    /// Gross margin percentage from the raw (unrounded) sums.
    ///
    /// * nonzero subtotal — `((subtotal - cost) / |subtotal|) × 100`; the
    ///   absolute-value denominator keeps net-negative pricing well defined
    ///   without a special case.
    /// * zero subtotal, zero cost — `0`.
    /// * zero subtotal, nonzero cost — undefined (cost with no revenue).
    fn gross_margin(
        &self,
        subtotal: Decimal,
        total_cost: Decimal,
    ) -> GrossMargin {
        if subtotal != Decimal::ZERO {
            let percent = (subtotal - total_cost) / subtotal.abs() * Decimal::ONE_HUNDRED;
            GrossMargin::Percent(percent)
        } else if total_cost == Decimal::ZERO {
            GrossMargin::Percent(Decimal::ZERO)
        } else {
            GrossMargin::Undefined
        }
    }
}
