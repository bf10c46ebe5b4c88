//! Text rendering of the totals summary and the printable estimate sheet.
//!
//! Pure string builders: no store access, no side effects. The caller
//! hands in a completed, stable snapshot (items + totals) and gets the
//! rendered document back. Rendering never recalculates.

use estimate_core::calculations::EstimateTotals;
use estimate_core::models::{CompanyInfo, EstimateFields, LineItem, format_date_jp};
use estimate_core::money::format_amount;

const SHEET_WIDTH: usize = 78;

/// Renders the on-form totals panel.
pub fn render_summary(totals: &EstimateTotals) -> String {
    let mut out = String::new();
    out.push_str(&format!("小計:     {}\n", format_amount(totals.subtotal, true)));
    out.push_str(&format!("消費税:   {}\n", format_amount(totals.tax, true)));
    out.push_str(&format!("合計:     {}\n", format_amount(totals.total, true)));
    out.push_str(&format!(
        "原価合計: {}\n",
        format_amount(totals.total_cost, true)
    ));
    out.push_str(&format!("粗利率:   {}\n", totals.gross_margin));
    out
}

/// Renders the printable estimate sheet (御見積書).
///
/// `fields.estimate_number` is expected to be filled in by the caller;
/// the date and expiry rows are omitted when no estimate date is set.
pub fn render_sheet(
    company: &CompanyInfo,
    fields: &EstimateFields,
    items: &[LineItem],
    totals: &EstimateTotals,
) -> String {
    let rule = "=".repeat(SHEET_WIDTH);
    let thin_rule = "-".repeat(SHEET_WIDTH);

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&center("御 見 積 書"));
    out.push('\n');
    out.push_str(&rule);
    out.push_str("\n\n");

    out.push_str(&format!("{} 御中\n\n", fields.client));

    if company.has_identity() {
        out.push_str(&company_block(company));
        out.push('\n');
    }

    out.push_str("下記の通り御見積もり申し上げます。\n\n");
    out.push_str(&format!("件名:     {}\n", fields.project));
    if let Some(date) = fields.estimate_date {
        out.push_str(&format!("見積日:   {}\n", format_date_jp(date)));
    }
    out.push_str(&format!("見積番号: {}\n", fields.estimate_number));
    if let Some(expiry) = fields.expiry_date() {
        out.push_str(&format!("有効期限: {}\n", format_date_jp(expiry)));
    }
    out.push('\n');

    out.push_str(&format!(
        "見積金額 {}（消費税込）\n\n",
        format_amount(totals.total, true)
    ));

    out.push_str(&format!(
        "{:>4}  {:<30} {:>8} {:>6} {:>12} {:>12}\n",
        "No.", "摘要", "数量", "単位", "単価", "金額"
    ));
    out.push_str(&thin_rule);
    out.push('\n');
    for item in items {
        out.push_str(&format!(
            "{:>4}  {:<30} {:>8} {:>6} {:>12} {:>12}\n",
            item.no,
            item.description,
            item.quantity,
            item.unit,
            format_amount(item.unit_price(), false),
            format_amount(item.amount(), false),
        ));
    }
    out.push_str(&thin_rule);
    out.push('\n');

    out.push_str(&format!("{:>64} {:>13}\n", "小計", format_amount(totals.subtotal, true)));
    out.push_str(&format!("{:>63} {:>13}\n", "消費税", format_amount(totals.tax, true)));
    out.push_str(&format!("{:>64} {:>13}\n", "合計", format_amount(totals.total, true)));

    let notes = note_lines(&fields.notes);
    if !notes.is_empty() {
        out.push_str("\n備考\n");
        for note in notes {
            out.push_str(&note);
            out.push('\n');
        }
    }

    out
}

fn center(text: &str) -> String {
    // Display-width of CJK text is approximated as twice the char count;
    // close enough for a monospace print.
    let width = text.chars().count() * 2;
    let pad = SHEET_WIDTH.saturating_sub(width) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn company_block(company: &CompanyInfo) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", company.name));
    if !company.postal.is_empty() {
        out.push_str(&format!("〒{}\n", company.postal));
    }
    if !company.address.is_empty() {
        out.push_str(&format!("{}\n", company.address));
    }
    if !company.phone.is_empty() {
        out.push_str(&format!("TEL: {}\n", company.phone));
    }
    if !company.fax.is_empty() {
        out.push_str(&format!("FAX: {}\n", company.fax));
    }
    out
}

/// Splits the free-text notes into ※-prefixed items, dropping blank lines.
fn note_lines(notes: &str) -> Vec<String> {
    notes
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.starts_with('※') {
                line.to_string()
            } else {
                format!("※ {line}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use estimate_core::calculations::TotalsEngine;

    use super::*;

    fn sample() -> (CompanyInfo, EstimateFields, Vec<LineItem>, EstimateTotals) {
        let company = CompanyInfo {
            name: "サンプル建設株式会社".to_string(),
            postal: "100-0001".to_string(),
            address: "東京都千代田区1-1-1".to_string(),
            phone: "03-1234-5678".to_string(),
            ..CompanyInfo::default()
        };
        let fields = EstimateFields {
            client: "株式会社サンプル".to_string(),
            project: "事務所改装工事".to_string(),
            estimate_number: "Q-20260801-0042".to_string(),
            estimate_date: chrono::NaiveDate::from_ymd_opt(2026, 8, 1),
            expiry_days: 30,
            notes: "搬入経路は別途確認\n※ 価格は税込です".to_string(),
        };
        let items = vec![LineItem {
            no: 1,
            description: "基礎工事".to_string(),
            quantity: dec!(2),
            unit: "式".to_string(),
            unit_cost: dec!(1000),
            markup_rate: dec!(1.3),
        }];
        let totals = TotalsEngine::default().calculate(&items);
        (company, fields, items, totals)
    }

    #[test]
    fn summary_shows_all_five_figures() {
        let (_, _, items, _) = sample();
        let totals = TotalsEngine::default().calculate(&items);

        let summary = render_summary(&totals);

        assert!(summary.contains("小計:     ¥2,600"));
        assert!(summary.contains("消費税:   ¥260"));
        assert!(summary.contains("合計:     ¥2,860"));
        assert!(summary.contains("原価合計: ¥2,000"));
        assert!(summary.contains("粗利率:   23.1%"));
    }

    #[test]
    fn summary_renders_undefined_margin_placeholder() {
        let items = vec![LineItem {
            no: 1,
            description: "持ち出し".to_string(),
            quantity: dec!(1),
            unit: "式".to_string(),
            unit_cost: dec!(500),
            markup_rate: dec!(0),
        }];
        let totals = TotalsEngine::default().calculate(&items);

        assert!(render_summary(&totals).contains("粗利率:   ---"));
    }

    #[test]
    fn sheet_contains_header_and_parties() {
        let (company, fields, items, totals) = sample();

        let sheet = render_sheet(&company, &fields, &items, &totals);

        assert!(sheet.contains("御 見 積 書"));
        assert!(sheet.contains("株式会社サンプル 御中"));
        assert!(sheet.contains("サンプル建設株式会社"));
        assert!(sheet.contains("〒100-0001"));
        assert!(sheet.contains("件名:     事務所改装工事"));
        assert!(sheet.contains("見積番号: Q-20260801-0042"));
    }

    #[test]
    fn sheet_derives_expiry_from_validity_window() {
        let (company, fields, items, totals) = sample();

        let sheet = render_sheet(&company, &fields, &items, &totals);

        assert!(sheet.contains("見積日:   2026年8月1日"));
        assert!(sheet.contains("有効期限: 2026年8月31日"));
    }

    #[test]
    fn sheet_omits_date_rows_without_estimate_date() {
        let (company, mut fields, items, totals) = sample();
        fields.estimate_date = None;

        let sheet = render_sheet(&company, &fields, &items, &totals);

        assert!(!sheet.contains("見積日"));
        assert!(!sheet.contains("有効期限"));
    }

    #[test]
    fn sheet_shows_item_row_and_totals() {
        let (company, fields, items, totals) = sample();

        let sheet = render_sheet(&company, &fields, &items, &totals);

        assert!(sheet.contains("基礎工事"));
        assert!(sheet.contains("1,300")); // 単価 = cost × markup
        assert!(sheet.contains("2,600"));
        assert!(sheet.contains("見積金額 ¥2,860"));
    }

    #[test]
    fn sheet_omits_company_block_without_identity() {
        let (_, fields, items, totals) = sample();

        let sheet = render_sheet(&CompanyInfo::default(), &fields, &items, &totals);

        assert!(!sheet.contains("TEL:"));
    }

    #[test]
    fn notes_are_prefixed_once() {
        assert_eq!(
            note_lines("搬入経路は別途確認\n\n※ 価格は税込です"),
            vec!["※ 搬入経路は別途確認", "※ 価格は税込です"]
        );
    }
}
