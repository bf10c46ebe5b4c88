//! Form-submission validation.
//!
//! Validation is deliberately separate from numeric coercion: coercion
//! never blocks a calculation (garbage becomes zero), while validation
//! decides whether the form is fit to submit, save or render. Blocking
//! problems land in `errors`; conditions the original flow confirmed with
//! the user (negative cost, markup that zeroes a row) land in `warnings`.

use rust_decimal::Decimal;

use crate::models::{EstimateFields, LineItemDraft};
use crate::money::parse_amount;

/// Outcome of validating the estimate form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that block submission.
    pub errors: Vec<String>,
    /// Conditions to surface for confirmation; they do not block.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// True when nothing blocks submission.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(
        &mut self,
        message: String,
    ) {
        self.errors.push(message);
    }

    fn warn(
        &mut self,
        message: String,
    ) {
        self.warnings.push(message);
    }
}

/// Validates the header fields and line-item rows of the estimate form.
///
/// Row messages carry the 1-based row number.
pub fn validate_form(
    fields: &EstimateFields,
    rows: &[LineItemDraft],
) -> ValidationReport {
    let mut report = ValidationReport::default();

    if fields.client.trim().is_empty() {
        report.error("client is required".to_string());
    }
    if fields.project.trim().is_empty() {
        report.error("project is required".to_string());
    }
    if rows.is_empty() {
        report.error("at least one line item is required".to_string());
    }

    for (i, row) in rows.iter().enumerate() {
        validate_row(&mut report, i + 1, row);
    }

    report
}

fn validate_row(
    report: &mut ValidationReport,
    row_no: usize,
    row: &LineItemDraft,
) {
    if row.description.trim().is_empty() {
        report.error(format!("row {row_no}: description is required"));
    }

    match parse_amount(&row.quantity) {
        Some(q) if q > Decimal::ZERO => {}
        Some(_) => report.error(format!(
            "row {row_no}: quantity must be greater than 0"
        )),
        None => report.error(format!("row {row_no}: quantity must be a number")),
    }

    let cost = parse_amount(&row.unit_cost);
    if cost.is_none() {
        report.error(format!("row {row_no}: unit cost must be a number"));
    }

    match parse_amount(&row.markup_rate) {
        Some(rate) => {
            // A non-positive markup zeroes or negates the row's amount;
            // the original flow asked the user to confirm before continuing.
            if rate <= Decimal::ZERO && cost.is_some_and(|c| c != Decimal::ZERO) {
                report.warn(format!(
                    "row {row_no}: markup rate {rate} makes the line amount zero or negative"
                ));
            }
        }
        None => report.error(format!("row {row_no}: markup rate must be a number")),
    }

    if cost.is_some_and(|c| c < Decimal::ZERO) {
        report.warn(format!("row {row_no}: unit cost is negative"));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fields() -> EstimateFields {
        EstimateFields {
            client: "株式会社サンプル".to_string(),
            project: "改装工事".to_string(),
            ..EstimateFields::default()
        }
    }

    fn row(
        description: &str,
        qty: &str,
        cost: &str,
        markup: &str,
    ) -> LineItemDraft {
        LineItemDraft {
            description: description.to_string(),
            quantity: qty.to_string(),
            unit: "式".to_string(),
            unit_cost: cost.to_string(),
            markup_rate: markup.to_string(),
        }
    }

    #[test]
    fn valid_form_passes() {
        let report = validate_form(&fields(), &[row("基礎工事", "2", "1000", "1.3")]);

        assert!(report.is_ok());
        assert_eq!(report.warnings, Vec::<String>::new());
    }

    #[test]
    fn missing_client_and_project_are_errors() {
        let report = validate_form(
            &EstimateFields::default(),
            &[row("基礎工事", "1", "100", "1.0")],
        );

        assert_eq!(
            report.errors,
            vec![
                "client is required".to_string(),
                "project is required".to_string(),
            ]
        );
    }

    #[test]
    fn empty_item_list_is_an_error() {
        let report = validate_form(&fields(), &[]);

        assert_eq!(report.errors, vec!["at least one line item is required"]);
    }

    #[test]
    fn blank_description_is_an_error() {
        let report = validate_form(&fields(), &[row("  ", "1", "100", "1.0")]);

        assert_eq!(report.errors, vec!["row 1: description is required"]);
    }

    #[test]
    fn non_positive_quantity_is_an_error() {
        let zero = validate_form(&fields(), &[row("工事", "0", "100", "1.0")]);
        let garbage = validate_form(&fields(), &[row("工事", "abc", "100", "1.0")]);

        assert_eq!(zero.errors, vec!["row 1: quantity must be greater than 0"]);
        assert_eq!(garbage.errors, vec!["row 1: quantity must be a number"]);
    }

    #[test]
    fn non_numeric_cost_and_markup_are_errors() {
        let report = validate_form(&fields(), &[row("工事", "1", "x", "y")]);

        assert_eq!(
            report.errors,
            vec![
                "row 1: unit cost must be a number".to_string(),
                "row 1: markup rate must be a number".to_string(),
            ]
        );
    }

    #[test]
    fn zeroing_markup_is_a_warning_not_an_error() {
        let report = validate_form(&fields(), &[row("工事", "1", "500", "0")]);

        assert!(report.is_ok());
        assert_eq!(
            report.warnings,
            vec!["row 1: markup rate 0 makes the line amount zero or negative"]
        );
    }

    #[test]
    fn zero_markup_on_zero_cost_row_is_fine() {
        let report = validate_form(&fields(), &[row("工事", "1", "0", "0")]);

        assert!(report.is_ok());
        assert_eq!(report.warnings, Vec::<String>::new());
    }

    #[test]
    fn negative_cost_is_a_warning() {
        let report = validate_form(&fields(), &[row("値引き", "1", "-500", "1.0")]);

        assert!(report.is_ok());
        assert_eq!(report.warnings, vec!["row 1: unit cost is negative"]);
    }

    #[test]
    fn row_numbers_are_one_based() {
        let rows = vec![
            row("工事", "1", "100", "1.0"),
            row("", "1", "100", "1.0"),
        ];

        let report = validate_form(&fields(), &rows);

        assert_eq!(report.errors, vec!["row 2: description is required"]);
    }
}
