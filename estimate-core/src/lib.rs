pub mod calculations;
pub mod models;
pub mod money;
pub mod store;

pub use calculations::{EstimateTotals, GrossMargin, TotalsEngine, ValidationReport, validate_form};
pub use models::*;
pub use store::{EstimateStore, StoreError};
