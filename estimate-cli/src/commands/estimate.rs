//! Draft-driven commands: calculate, render the sheet, save a snapshot.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use estimate_core::calculations::{TotalsEngine, validate_form};
use estimate_core::models::{LineItem, SavedEstimate, generate_estimate_number};
use estimate_core::store::EstimateStore;

use crate::form::EstimateDraft;
use crate::render::{render_sheet, render_summary};

/// Validates a draft and normalizes its rows, printing the report.
///
/// Warnings are surfaced but do not block; errors abort the command.
fn validated_items(draft: &EstimateDraft) -> Result<Vec<LineItem>> {
    let report = validate_form(&draft.fields, &draft.rows);
    for warning in &report.warnings {
        warn!("{warning}");
    }
    if !report.is_ok() {
        for error in &report.errors {
            eprintln!("error: {error}");
        }
        bail!("draft failed validation with {} error(s)", report.errors.len());
    }

    Ok(draft
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| row.normalize((i + 1) as u32))
        .collect())
}

/// `calc`: compute and print the totals for a draft file.
pub fn calc(draft_path: &Path) -> Result<()> {
    let draft = EstimateDraft::load(draft_path)?;
    let items = validated_items(&draft)?;
    let totals = TotalsEngine::default().calculate(&items);

    print!("{}", render_summary(&totals));
    Ok(())
}

/// `sheet`: render the printable estimate sheet for a draft file.
///
/// A missing estimate number is generated here, exactly where the original
/// filled it in on first render.
pub fn sheet(
    store: &dyn EstimateStore,
    draft_path: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let draft = EstimateDraft::load(draft_path)?;
    let items = validated_items(&draft)?;
    let totals = TotalsEngine::default().calculate(&items);

    let mut fields = draft.fields;
    if fields.estimate_number.is_empty() {
        fields.estimate_number = generate_estimate_number();
        info!(number = %fields.estimate_number, "generated estimate number");
    }

    let company = store.load_company_info()?;
    let rendered = render_sheet(&company, &fields, &items, &totals);

    match output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("cannot write sheet to '{}'", path.display()))?;
            info!(path = %path.display(), "estimate sheet written");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// `save`: calculate a draft and persist it as a saved estimate with a
/// frozen totals snapshot.
pub fn save(
    store: &dyn EstimateStore,
    draft_path: &Path,
    name: Option<&str>,
) -> Result<()> {
    let draft = EstimateDraft::load(draft_path)?;
    let items = validated_items(&draft)?;
    let totals = TotalsEngine::default().calculate(&items);

    let estimate = SavedEstimate::new(name.unwrap_or(""), draft.fields, items, totals);
    store.save_estimate(&estimate)?;

    println!("saved '{}' ({})", estimate.name, estimate.id);
    Ok(())
}
