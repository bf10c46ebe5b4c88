//! Application settings persisted alongside the company info.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Default timeout for the external PDF rendering pipeline, in seconds.
pub const DEFAULT_PDF_TIMEOUT_SECS: u32 = 15;

/// Accepted range for the PDF timeout setting.
pub const PDF_TIMEOUT_RANGE: RangeInclusive<u32> = 5..=120;

/// User-adjustable application settings.
///
/// The PDF timeout only governs the presentation layer's rendering
/// pipeline; the calculation core stores it without interpreting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub debug_mode: bool,
    pub pdf_timeout_secs: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            debug_mode: false,
            pdf_timeout_secs: DEFAULT_PDF_TIMEOUT_SECS,
        }
    }
}

impl AppSettings {
    /// Clamps persisted values back into their accepted ranges.
    ///
    /// An out-of-range timeout (hand-edited file, older import) falls back
    /// to the default rather than being rejected.
    pub fn sanitized(mut self) -> Self {
        if !PDF_TIMEOUT_RANGE.contains(&self.pdf_timeout_secs) {
            self.pdf_timeout_secs = DEFAULT_PDF_TIMEOUT_SECS;
        }
        self
    }
}
