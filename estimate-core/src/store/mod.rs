//! The persistence seam.
//!
//! The application state (settings, company branding, saved estimates) is a
//! handful of small blobs behind this trait. Backend crates provide the
//! actual storage; the core and the shell only ever see [`EstimateStore`].

use thiserror::Error;
use uuid::Uuid;

use crate::models::{AppSettings, CompanyInfo, SavedEstimate};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage cannot be used at all (probe write failed).
    #[error("storage is not available: {0}")]
    Unavailable(String),

    #[error("estimate not found")]
    NotFound,

    #[error("storage I/O error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Storage backend for settings, company info and saved estimates.
///
/// Load semantics are fail-soft where the data is recoverable: a missing or
/// corrupt blob yields the default value (with a logged warning), matching
/// how the app must keep working when its storage decays. Only genuine I/O
/// failures surface as errors.
///
/// Saved estimates mutate by full replacement: `save_estimate` appends a
/// new id or replaces an existing one wholesale.
pub trait EstimateStore: Send + Sync {
    fn load_settings(&self) -> Result<AppSettings, StoreError>;
    fn save_settings(&self, settings: &AppSettings) -> Result<(), StoreError>;

    fn load_company_info(&self) -> Result<CompanyInfo, StoreError>;
    fn save_company_info(&self, info: &CompanyInfo) -> Result<(), StoreError>;

    fn list_estimates(&self) -> Result<Vec<SavedEstimate>, StoreError>;
    fn get_estimate(&self, id: Uuid) -> Result<SavedEstimate, StoreError>;
    fn save_estimate(&self, estimate: &SavedEstimate) -> Result<(), StoreError>;
    fn delete_estimate(&self, id: Uuid) -> Result<(), StoreError>;

    /// Removes every stored blob: settings, company info and estimates.
    fn clear_all(&self) -> Result<(), StoreError>;
}
