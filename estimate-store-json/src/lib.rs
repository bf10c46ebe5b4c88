pub mod export;
pub mod store;

pub use export::{ExportBundle, ImportError, ImportSummary};
pub use store::JsonFileStore;
