//! The estimate draft file: the form the browser UI used to collect,
//! expressed as a TOML document.
//!
//! The draft is the raw boundary value: numeric item fields arrive as
//! whatever the user typed (a TOML number or a string) and are handed to
//! the core as strings, where coercion and validation decide what they
//! mean. Parsing a draft therefore only fails on malformed TOML, never on
//! a bad quantity.
//!
//! ```toml
//! client = "株式会社サンプル"
//! project = "事務所改装工事"
//! estimate_date = "2026-08-01"
//! expiry_days = 30
//! notes = "現場状況により変動する場合があります"
//!
//! [[items]]
//! description = "基礎工事"
//! quantity = 2
//! unit = "式"
//! cost = 1000
//! markup_rate = 1.3
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use estimate_core::models::{EstimateFields, LineItemDraft};

/// A numeric form field as written in the draft file.
///
/// Accepts a bare TOML number or a quoted string; both reach the core as
/// the raw text the user wrote.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Default for RawField {
    fn default() -> Self {
        RawField::Text(String::new())
    }
}

impl RawField {
    fn into_raw(self) -> String {
        match self {
            RawField::Text(s) => s,
            RawField::Integer(n) => n.to_string(),
            RawField::Float(x) => x.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DraftItem {
    description: String,
    quantity: RawField,
    unit: String,
    cost: RawField,
    markup_rate: RawField,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DraftFile {
    client: String,
    project: String,
    estimate_number: String,
    estimate_date: String,
    expiry_days: Option<u32>,
    notes: String,
    items: Vec<DraftItem>,
}

/// A parsed draft: header fields plus raw line-item rows, ready for
/// validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateDraft {
    pub fields: EstimateFields,
    pub rows: Vec<LineItemDraft>,
}

impl EstimateDraft {
    /// Reads and parses a draft file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read draft file '{}'", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid draft file '{}'", path.display()))
    }

    /// Parses a draft from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        let file: DraftFile = toml::from_str(text)?;

        let estimate_date = parse_estimate_date(&file.estimate_date);
        let fields = EstimateFields {
            client: file.client,
            project: file.project,
            estimate_number: file.estimate_number.trim().to_string(),
            estimate_date,
            expiry_days: file.expiry_days.unwrap_or(30),
            notes: file.notes,
        };

        let rows = file
            .items
            .into_iter()
            .map(|item| LineItemDraft {
                description: item.description,
                quantity: item.quantity.into_raw(),
                unit: item.unit,
                unit_cost: item.cost.into_raw(),
                markup_rate: item.markup_rate.into_raw(),
            })
            .collect();

        Ok(Self { fields, rows })
    }
}

/// Parses the `YYYY-MM-DD` estimate date, degrading to none on bad input
/// (the sheet then simply omits the date and expiry rows).
fn parse_estimate_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(input = trimmed, "unparseable estimate date: {e}");
            None
        }
    }
}

/// Re-emits a saved estimate as a draft file, so it can be edited and
/// recalculated. This is how a saved estimate gets loaded back into the
/// form.
pub fn to_draft_toml(
    fields: &EstimateFields,
    items: &[estimate_core::models::LineItem],
) -> String {
    let mut out = String::new();
    out.push_str(&format!("client = {}\n", toml_string(&fields.client)));
    out.push_str(&format!("project = {}\n", toml_string(&fields.project)));
    if !fields.estimate_number.is_empty() {
        out.push_str(&format!(
            "estimate_number = {}\n",
            toml_string(&fields.estimate_number)
        ));
    }
    if let Some(date) = fields.estimate_date {
        out.push_str(&format!("estimate_date = \"{}\"\n", date.format("%Y-%m-%d")));
    }
    out.push_str(&format!("expiry_days = {}\n", fields.expiry_days));
    if !fields.notes.is_empty() {
        out.push_str(&format!("notes = {}\n", toml_string(&fields.notes)));
    }
    for item in items {
        out.push_str("\n[[items]]\n");
        out.push_str(&format!("description = {}\n", toml_string(&item.description)));
        out.push_str(&format!("quantity = \"{}\"\n", item.quantity));
        out.push_str(&format!("unit = {}\n", toml_string(&item.unit)));
        out.push_str(&format!("cost = \"{}\"\n", item.unit_cost));
        out.push_str(&format!("markup_rate = \"{}\"\n", item.markup_rate));
    }
    out
}

fn toml_string(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DRAFT: &str = r#"
client = "株式会社サンプル"
project = "事務所改装工事"
estimate_date = "2026-08-01"
notes = "搬入経路は別途確認"

[[items]]
description = "基礎工事"
quantity = 2
unit = "式"
cost = 1000
markup_rate = 1.3

[[items]]
description = "諸経費"
quantity = "1"
unit = "式"
cost = "5,000"
markup_rate = "1.0"
"#;

    #[test]
    fn parse_reads_header_fields() {
        let draft = EstimateDraft::parse(DRAFT).unwrap();

        assert_eq!(draft.fields.client, "株式会社サンプル");
        assert_eq!(draft.fields.project, "事務所改装工事");
        assert_eq!(
            draft.fields.estimate_date,
            NaiveDate::from_ymd_opt(2026, 8, 1)
        );
        assert_eq!(draft.fields.expiry_days, 30);
    }

    #[test]
    fn parse_passes_numbers_and_strings_through_as_raw_text() {
        let draft = EstimateDraft::parse(DRAFT).unwrap();

        assert_eq!(draft.rows[0].quantity, "2");
        assert_eq!(draft.rows[0].markup_rate, "1.3");
        assert_eq!(draft.rows[1].unit_cost, "5,000");
    }

    #[test]
    fn parse_tolerates_missing_optional_fields() {
        let draft = EstimateDraft::parse(
            "client = \"a\"\nproject = \"b\"\n\n[[items]]\ndescription = \"c\"\n",
        )
        .unwrap();

        assert_eq!(draft.fields.estimate_date, None);
        assert_eq!(draft.rows[0].quantity, "");
    }

    #[test]
    fn parse_degrades_bad_date_to_none() {
        let draft = EstimateDraft::parse(
            "client = \"a\"\nproject = \"b\"\nestimate_date = \"not-a-date\"\n",
        )
        .unwrap();

        assert_eq!(draft.fields.estimate_date, None);
    }

    #[test]
    fn parse_rejects_malformed_toml() {
        assert!(EstimateDraft::parse("client = ").is_err());
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        assert!(EstimateDraft::parse("customer = \"a\"\n").is_err());
    }

    #[test]
    fn draft_round_trips_through_toml_emission() {
        let draft = EstimateDraft::parse(DRAFT).unwrap();
        let items: Vec<_> = draft
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| r.normalize((i + 1) as u32))
            .collect();

        let emitted = to_draft_toml(&draft.fields, &items);
        let reparsed = EstimateDraft::parse(&emitted).unwrap();

        assert_eq!(reparsed.fields, draft.fields);
        let reitems: Vec<_> = reparsed
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| r.normalize((i + 1) as u32))
            .collect();
        assert_eq!(reitems, items);
    }
}
