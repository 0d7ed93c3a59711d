use crate::tally::TOTAL;
use polars::prelude::*;

pub const PREVIEW_ROWS: usize = 5;

pub fn preview(df: &DataFrame) -> DataFrame {
    df.head(Some(PREVIEW_ROWS))
}

pub fn null_counts(df: &DataFrame) -> DataFrame {
    df.null_count()
}

pub fn summary(df: &DataFrame) -> PolarsResult<DataFrame> {
    Ok(df.clone()) // DIAGNOSTIC STUB - REVERT
}

pub fn dtypes_frame(df: &DataFrame) -> PolarsResult<DataFrame> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let dtypes: Vec<String> = df.dtypes().iter().map(|d| d.to_string()).collect();
    df!(
        "Column" => columns,
        "Dtype" => dtypes,
    )
}

/// The `n` rows with the highest stated total. Ties keep their original row
/// order, so the ranking is reproducible for equal totals.
pub fn top_by_total(df: &DataFrame, n: usize) -> PolarsResult<DataFrame> {
    let sorted = df.sort(
        [TOTAL],
        SortMultipleOptions::default()
            .with_order_descending(true)
            .with_nulls_last(true)
            .with_maintain_order(true),
    )?;
    Ok(sorted.head(Some(n)))
}
