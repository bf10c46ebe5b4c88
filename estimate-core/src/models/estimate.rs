//! Saved estimates and the header fields of the estimate form.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::EstimateTotals;
use crate::models::LineItem;

/// Header fields of the estimate form (everything that is not a line item).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateFields {
    /// 見積提出先 (the client the estimate is addressed to).
    pub client: String,
    /// 件名 (project / subject line).
    pub project: String,
    /// Estimate number; generated on render when left empty.
    #[serde(default)]
    pub estimate_number: String,
    #[serde(default)]
    pub estimate_date: Option<NaiveDate>,
    /// Validity window in days, counted from the estimate date.
    #[serde(default = "default_expiry_days")]
    pub expiry_days: u32,
    /// Free-text notes, one ※ item per line.
    #[serde(default)]
    pub notes: String,
}

fn default_expiry_days() -> u32 {
    30
}

impl EstimateFields {
    /// Expiry date derived from the estimate date and the validity window.
    /// `None` when no estimate date is set.
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.estimate_date
            .and_then(|d| d.checked_add_days(Days::new(u64::from(self.expiry_days))))
    }
}

/// A persisted estimate: the form state plus a frozen totals snapshot.
///
/// The snapshot is the totals computed at save time. Loading a saved
/// estimate does not recompute it; only an explicit recalculation does.
/// Mutation is full replacement by id — there is no partial edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEstimate {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub fields: EstimateFields,
    pub items: Vec<LineItem>,
    pub totals: EstimateTotals,
}

impl SavedEstimate {
    /// Assembles a new saved estimate with a fresh id and timestamp.
    ///
    /// An empty `name` falls back to "<client> 見積書".
    pub fn new(
        name: &str,
        fields: EstimateFields,
        items: Vec<LineItem>,
        totals: EstimateTotals,
    ) -> Self {
        let name = if name.trim().is_empty() {
            format!("{} 見積書", fields.client)
        } else {
            name.trim().to_string()
        };
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
            fields,
            items,
            totals,
        }
    }
}

/// Generates an estimate number of the form `Q-YYYYMMDD-NNNN`.
pub fn generate_estimate_number() -> String {
    let today = Local::now().date_naive();
    let suffix: u32 = rand::rng().random_range(0..10_000);
    format!("Q-{}-{suffix:04}", today.format("%Y%m%d"))
}

/// Formats a date in the Japanese convention: `2026年8月25日`.
pub fn format_date_jp(date: NaiveDate) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}
