//! Application settings: debug mode and the PDF-pipeline timeout.

use anyhow::Result;
use tracing::warn;

use estimate_core::models::{DEFAULT_PDF_TIMEOUT_SECS, PDF_TIMEOUT_RANGE};
use estimate_core::store::EstimateStore;

/// `settings show`
pub fn show(store: &dyn EstimateStore) -> Result<()> {
    let settings = store.load_settings()?;

    println!("debug_mode:       {}", settings.debug_mode);
    println!("pdf_timeout_secs: {}", settings.pdf_timeout_secs);
    Ok(())
}

/// `settings set`: update the given fields and persist.
pub fn set(
    store: &dyn EstimateStore,
    debug: Option<bool>,
    pdf_timeout_secs: Option<u32>,
) -> Result<()> {
    let mut settings = store.load_settings()?;

    if let Some(debug) = debug {
        settings.debug_mode = debug;
    }
    if let Some(timeout) = pdf_timeout_secs {
        if PDF_TIMEOUT_RANGE.contains(&timeout) {
            settings.pdf_timeout_secs = timeout;
        } else {
            warn!(
                "timeout {timeout}s is outside {}..={}s, using the default {}s",
                PDF_TIMEOUT_RANGE.start(),
                PDF_TIMEOUT_RANGE.end(),
                DEFAULT_PDF_TIMEOUT_SECS
            );
            settings.pdf_timeout_secs = DEFAULT_PDF_TIMEOUT_SECS;
        }
    }

    store.save_settings(&settings)?;
    println!("settings saved");
    Ok(())
}
