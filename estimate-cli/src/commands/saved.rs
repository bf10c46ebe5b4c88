//! Saved-estimate management: list, show, delete.

use anyhow::Result;
use uuid::Uuid;

use estimate_core::money::format_amount;
use estimate_core::store::EstimateStore;

use crate::form::to_draft_toml;
use crate::render::render_summary;

/// `list`: one line per saved estimate.
pub fn list(store: &dyn EstimateStore) -> Result<()> {
    let estimates = store.list_estimates()?;
    if estimates.is_empty() {
        println!("no saved estimates");
        return Ok(());
    }

    for estimate in estimates {
        println!(
            "{}  {}  {:>12}  {}",
            estimate.id,
            estimate.created_at.format("%Y-%m-%d"),
            format_amount(estimate.totals.total, true),
            estimate.name,
        );
    }
    Ok(())
}

/// `show`: print a saved estimate's frozen snapshot.
///
/// The snapshot is shown as stored; nothing is recalculated. With
/// `as_toml` the estimate is re-emitted as a draft file instead, which is
/// how a saved estimate gets loaded back into the form for editing.
pub fn show(
    store: &dyn EstimateStore,
    id: Uuid,
    as_toml: bool,
) -> Result<()> {
    let estimate = store.get_estimate(id)?;

    if as_toml {
        print!("{}", to_draft_toml(&estimate.fields, &estimate.items));
        return Ok(());
    }

    println!("{}", estimate.name);
    println!("id:        {}", estimate.id);
    println!("created:   {}", estimate.created_at.format("%Y-%m-%d %H:%M"));
    println!("client:    {}", estimate.fields.client);
    println!("project:   {}", estimate.fields.project);
    println!("items:     {}", estimate.items.len());
    println!();
    print!("{}", render_summary(&estimate.totals));
    Ok(())
}

/// `delete`: remove a saved estimate.
pub fn delete(
    store: &dyn EstimateStore,
    id: Uuid,
) -> Result<()> {
    store.delete_estimate(id)?;
    println!("deleted {id}");
    Ok(())
}
