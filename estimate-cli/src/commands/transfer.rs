//! Whole-data transfer: export, import, reset.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;

use estimate_core::store::EstimateStore;
use estimate_store_json::export;

/// `export`: write the full data bundle to a JSON file.
pub fn export_data(
    store: &dyn EstimateStore,
    file: &Path,
) -> Result<()> {
    export::write_export(store, file)?;
    println!("exported to {}", file.display());
    Ok(())
}

/// `import`: read a bundle, confirm, and overwrite the current data.
pub fn import_data(
    store: &dyn EstimateStore,
    file: &Path,
    assume_yes: bool,
) -> Result<()> {
    let bundle = export::read_import(file)?;

    println!("the import will overwrite:");
    if bundle.company_info.is_some() {
        println!("  - company information");
    }
    if let Some(estimates) = &bundle.saved_estimates {
        println!("  - saved estimates ({})", estimates.len());
    }
    if bundle.settings.is_some() {
        println!("  - application settings");
    }

    if !assume_yes && !confirm("continue?")? {
        println!("import cancelled");
        return Ok(());
    }

    let summary = export::apply_import(store, &bundle)?;
    println!("import complete:");
    if summary.company_info {
        println!("  - company information");
    }
    if let Some(count) = summary.estimates {
        println!("  - saved estimates ({count})");
    }
    if summary.settings {
        println!("  - application settings");
    }
    Ok(())
}

/// `reset`: delete every stored blob after confirmation.
pub fn reset(
    store: &dyn EstimateStore,
    assume_yes: bool,
) -> Result<()> {
    if !assume_yes
        && !confirm("really delete all company information, settings and saved estimates?")?
    {
        println!("reset cancelled");
        return Ok(());
    }

    store.clear_all()?;
    println!("all settings and saved estimates deleted");
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}
