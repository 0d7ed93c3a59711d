use crate::tally::{BRONZE, GOLD, SILVER, TOTAL};
use polars::prelude::*;

pub const CHECK: &str = "Total Medals Check";
pub const DISCREPANCY: &str = "Discrepancy";

fn medal_sum() -> Expr {
    col(GOLD) + col(SILVER) + col(BRONZE)
}

/// Appends the recomputed medal sum and its difference against the stated
/// total. The original columns are left untouched; re-running on an already
/// checked frame just rewrites the same two columns.
pub fn with_check_columns(df: DataFrame) -> PolarsResult<DataFrame> {
    df.lazy()
        .with_columns([
            medal_sum().alias(CHECK),
            (medal_sum() - col(TOTAL)).alias(DISCREPANCY),
        ])
        .collect()
}

#[derive(Clone, Debug)]
pub struct TallyReport {
    pub consistent: DataFrame,
    pub inconsistent: DataFrame,
}

impl TallyReport {
    pub fn is_clean(&self) -> bool {
        self.inconsistent.height() == 0
    }
}

/// Splits a checked frame by `Discrepancy == 0`. Every row lands on exactly
/// one side; a null discrepancy (missing medal or total cell) counts as
/// inconsistent, since it is a data-quality finding either way.
pub fn partition(df: &DataFrame) -> PolarsResult<TallyReport> {
    let consistent = df
        .clone()
        .lazy()
        .filter(col(DISCREPANCY).eq(lit(0)).fill_null(lit(false)))
        .collect()?;
    let inconsistent = df
        .clone()
        .lazy()
        .filter(col(DISCREPANCY).neq(lit(0)).fill_null(lit(true)))
        .collect()?;
    Ok(TallyReport {
        consistent,
        inconsistent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tally::COUNTRY;

    fn tally() -> DataFrame {
        df!(
            COUNTRY => &["A", "B"],
            GOLD => &[10i64, 4],
            SILVER => &[5i64, 4],
            BRONZE => &[3i64, 4],
            TOTAL => &[18i64, 10],
        )
        .unwrap()
    }

    fn countries(df: &DataFrame) -> Vec<String> {
        df.column(COUNTRY)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap_or("").to_owned())
            .collect()
    }

    #[test]
    fn derives_check_and_discrepancy() {
        let checked = with_check_columns(tally()).unwrap();
        let check: Vec<i64> = checked
            .column(CHECK)
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        let disc: Vec<i64> = checked
            .column(DISCREPANCY)
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(check, vec![18, 12]);
        assert_eq!(disc, vec![0, 2]);
    }

    #[test]
    fn originals_are_not_mutated() {
        let input = tally();
        let checked = with_check_columns(input.clone()).unwrap();
        for name in [GOLD, SILVER, BRONZE, TOTAL] {
            assert_eq!(
                checked.column(name).unwrap(),
                input.column(name).unwrap()
            );
        }
    }

    #[test]
    fn partitions_by_discrepancy() {
        let checked = with_check_columns(tally()).unwrap();
        let report = partition(&checked).unwrap();
        assert_eq!(countries(&report.consistent), vec!["A"]);
        assert_eq!(countries(&report.inconsistent), vec!["B"]);
        assert!(!report.is_clean());
    }

    #[test]
    fn partition_union_covers_every_row_once() {
        let checked = with_check_columns(tally()).unwrap();
        let report = partition(&checked).unwrap();
        let mut seen = countries(&report.consistent);
        seen.extend(countries(&report.inconsistent));
        seen.sort();
        let mut expected = countries(&checked);
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn null_cells_land_in_inconsistent() {
        let df = DataFrame::new(vec![
            Series::new(COUNTRY, &["A", "B"]),
            Series::new(GOLD, &[Some(10i64), Some(4)]),
            Series::new(SILVER, &[Some(5i64), Some(4)]),
            Series::new(BRONZE, &[Some(3i64), Some(4)]),
            Series::new(TOTAL, &[Some(18i64), None]),
        ])
        .unwrap();
        let checked = with_check_columns(df).unwrap();
        let report = partition(&checked).unwrap();
        assert_eq!(countries(&report.consistent), vec!["A"]);
        assert_eq!(countries(&report.inconsistent), vec!["B"]);
    }

    #[test]
    fn validation_is_idempotent() {
        let once = with_check_columns(tally()).unwrap();
        let twice = with_check_columns(once.clone()).unwrap();
        assert_eq!(once, twice);

        let first = partition(&once).unwrap();
        let second = partition(&once).unwrap();
        assert_eq!(first.consistent, second.consistent);
        assert_eq!(first.inconsistent, second.inconsistent);
    }

    #[test]
    fn empty_frame_yields_empty_partitions() {
        let empty = tally().head(Some(0));
        let checked = with_check_columns(empty).unwrap();
        let report = partition(&checked).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.consistent.height(), 0);
        assert_eq!(report.inconsistent.height(), 0);
    }
}
