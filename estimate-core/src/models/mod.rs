mod company;
mod estimate;
mod line_item;
mod settings;

pub use company::CompanyInfo;
pub use estimate::{
    EstimateFields, SavedEstimate, format_date_jp, generate_estimate_number,
};
pub use line_item::{LineItem, LineItemDraft, renumber};
pub use settings::{AppSettings, DEFAULT_PDF_TIMEOUT_SECS, PDF_TIMEOUT_RANGE};
