//! Export and import of the full application data bundle.
//!
//! The bundle is a single pretty-printed JSON file carrying the same
//! sections the store holds: company info, saved estimates, settings. Every
//! section is optional on import, but a bundle that carries neither company
//! info nor estimates is rejected as not being ours.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use estimate_core::models::{AppSettings, CompanyInfo, SavedEstimate};
use estimate_core::store::{EstimateStore, StoreError};

use crate::store::DATA_VERSION;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read import file: {0}")]
    Read(String),

    #[error("import file is not valid JSON: {0}")]
    Parse(String),

    #[error("import data carries no version field")]
    MissingVersion,

    #[error("import data contains neither company info nor saved estimates")]
    MissingSections,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The export file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportBundle {
    #[serde(default)]
    pub version: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_info: Option<CompanyInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_estimates: Option<Vec<SavedEstimate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<AppSettings>,
}

/// What an import actually applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub company_info: bool,
    pub estimates: Option<usize>,
    pub settings: bool,
}

/// Collects the store's current state into a bundle.
pub fn export_bundle(store: &dyn EstimateStore) -> Result<ExportBundle, StoreError> {
    Ok(ExportBundle {
        version: DATA_VERSION.to_string(),
        timestamp: Utc::now(),
        company_info: Some(store.load_company_info()?),
        saved_estimates: Some(store.list_estimates()?),
        settings: Some(store.load_settings()?),
    })
}

/// Exports the store's state to a pretty-printed JSON file.
pub fn write_export(
    store: &dyn EstimateStore,
    path: &Path,
) -> Result<(), ImportError> {
    let bundle = export_bundle(store)?;
    let json = serde_json::to_string_pretty(&bundle)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    fs::write(path, json).map_err(|e| StoreError::Io(e.to_string()))?;
    info!(path = %path.display(), "data exported");
    Ok(())
}

/// Reads and validates an import file without applying it.
pub fn read_import(path: &Path) -> Result<ExportBundle, ImportError> {
    let text = fs::read_to_string(path).map_err(|e| ImportError::Read(e.to_string()))?;
    let bundle: ExportBundle =
        serde_json::from_str(&text).map_err(|e| ImportError::Parse(e.to_string()))?;

    if bundle.version.trim().is_empty() {
        return Err(ImportError::MissingVersion);
    }
    if bundle.company_info.is_none() && bundle.saved_estimates.is_none() {
        return Err(ImportError::MissingSections);
    }
    Ok(bundle)
}

/// Applies a validated bundle to the store, overwriting each section that
/// is present. Imported settings are sanitized before being stored.
pub fn apply_import(
    store: &dyn EstimateStore,
    bundle: &ExportBundle,
) -> Result<ImportSummary, ImportError> {
    let mut summary = ImportSummary::default();

    if let Some(info) = &bundle.company_info {
        store.save_company_info(info)?;
        summary.company_info = true;
    }
    if let Some(estimates) = &bundle.saved_estimates {
        // Whole-section replacement, like the original import.
        for existing in store.list_estimates()? {
            store.delete_estimate(existing.id)?;
        }
        for estimate in estimates {
            store.save_estimate(estimate)?;
        }
        summary.estimates = Some(estimates.len());
    }
    if let Some(settings) = bundle.settings {
        store.save_settings(&settings.sanitized())?;
        summary.settings = true;
    }

    info!(
        company_info = summary.company_info,
        estimates = ?summary.estimates,
        settings = summary.settings,
        "data imported"
    );
    Ok(summary)
}
