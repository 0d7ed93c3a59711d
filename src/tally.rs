use crate::error::TallyError;
use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

pub const COUNTRY: &str = "Country";
pub const GOLD: &str = "Gold";
pub const SILVER: &str = "Silver";
pub const BRONZE: &str = "Bronze";
pub const TOTAL: &str = "Total Medals";

/// Columns that must hold medal counts.
pub const COUNT_COLUMNS: [&str; 4] = [GOLD, SILVER, BRONZE, TOTAL];
pub const REQUIRED_COLUMNS: [&str; 5] = [COUNTRY, GOLD, SILVER, BRONZE, TOTAL];

pub fn read_tally_file(path: &Path) -> Result<DataFrame, TallyError> {
    let file = File::open(path)?;
    read_tally(file)
}

/// Loads a medal tally CSV, checks the schema and normalizes all count
/// columns to Int64. Extra columns are carried through untouched.
pub fn read_tally<R: MmapBytesReader>(reader: R) -> Result<DataFrame, TallyError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(10_000))
        .into_reader_with_file_handle(reader)
        .finish()?;
    validate_schema(&df)?;
    normalize_counts(df)
}

fn validate_schema(df: &DataFrame) -> Result<(), TallyError> {
    let names = df.get_column_names();
    for name in REQUIRED_COLUMNS {
        if !names.iter().any(|n| *n == name) {
            return Err(TallyError::MissingColumn { name });
        }
    }
    // A header-only upload infers every column as string. The cast in
    // normalize_counts handles the empty columns, so only frames with
    // actual rows get the dtype gate.
    if df.height() == 0 {
        return Ok(());
    }
    for name in COUNT_COLUMNS {
        let dtype = df.column(name)?.dtype();
        if !dtype.is_numeric() {
            return Err(TallyError::NonNumeric {
                name,
                dtype: dtype.clone(),
            });
        }
    }
    Ok(())
}

fn normalize_counts(df: DataFrame) -> Result<DataFrame, TallyError> {
    let casts: Vec<Expr> = COUNT_COLUMNS
        .iter()
        .map(|name| col(*name).cast(DataType::Int64))
        .collect();
    Ok(df.lazy().with_columns(casts).collect()?)
}
