use polars::prelude::*;

/// Describe() output is computed on first view and cached for the rest of
/// the upload's lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct TallySummary {
    pub summary_data: Option<DataFrame>,
    pub display: bool,
}

impl Default for TallySummary {
    fn default() -> Self {
        Self {
            summary_data: None,
            display: false,
        }
    }
}
