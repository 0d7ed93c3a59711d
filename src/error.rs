use polars::prelude::{DataType, PolarsError};
use thiserror::Error;

/// Everything that can go wrong between picking a file and having a
/// validated tally in memory.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("missing required column '{name}'")]
    MissingColumn { name: &'static str },
    #[error("column '{name}' must be numeric, found {dtype}")]
    NonNumeric { name: &'static str, dtype: DataType },
}
