//! The line-item model: raw per-row form values and their normalized form.
//!
//! A row arrives from the form as free text. [`LineItemDraft`] is that raw
//! boundary value; [`LineItemDraft::normalize`] coerces it into a computable
//! [`LineItem`]. Normalization has no failure mode: a field that does not
//! parse as a number degrades to zero instead of blocking calculation.
//! Rejecting genuinely invalid rows is form validation's job, a separate
//! step that runs before submission.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::coerce_amount;

/// Raw per-row field values as read from the form, before coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemDraft {
    pub description: String,
    pub quantity: String,
    pub unit: String,
    pub unit_cost: String,
    pub markup_rate: String,
}

impl LineItemDraft {
    /// Normalizes the draft into a computable line item.
    ///
    /// `no` is the row's 1-based position in the list. Numeric fields that
    /// fail to parse become exactly `0`.
    pub fn normalize(
        &self,
        no: u32,
    ) -> LineItem {
        LineItem {
            no,
            description: self.description.trim().to_string(),
            quantity: coerce_amount(&self.quantity),
            unit: self.unit.trim().to_string(),
            unit_cost: coerce_amount(&self.unit_cost),
            markup_rate: coerce_amount(&self.markup_rate),
        }
    }
}

/// One row of the estimate: a sellable unit with quantity, unit cost and
/// markup rate (a multiplier, not a percentage — 1.3 means cost plus 30%).
///
/// The line amount and line cost are always derived from the three scalar
/// inputs via [`LineItem::amount`] and [`LineItem::cost`]; they are never
/// stored independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// 1-based sequence number, reassigned whenever the list changes shape.
    pub no: u32,
    pub description: String,
    pub quantity: Decimal,
    /// Display-only unit label (式, 個, m2, ...); no arithmetic role.
    pub unit: String,
    pub unit_cost: Decimal,
    pub markup_rate: Decimal,
}

impl LineItem {
    /// Line amount: `quantity * unit_cost * markup_rate`, unrounded.
    pub fn amount(&self) -> Decimal {
        self.quantity * self.unit_cost * self.markup_rate
    }

    /// Line cost: `quantity * unit_cost`, unrounded.
    pub fn cost(&self) -> Decimal {
        self.quantity * self.unit_cost
    }

    /// Unit sale price: `unit_cost * markup_rate` (the sheet's 単価 column).
    pub fn unit_price(&self) -> Decimal {
        self.unit_cost * self.markup_rate
    }
}

/// Reassigns sequence numbers from list position after a reorder or removal.
pub fn renumber(items: &mut [LineItem]) {
    for (i, item) in items.iter_mut().enumerate() {
        item.no = (i + 1) as u32;
    }
}
