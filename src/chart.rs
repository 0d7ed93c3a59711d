use crate::report;
use crate::tally::{BRONZE, COUNTRY, GOLD, SILVER, TOTAL};
use egui::Color32;
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};
use polars::prelude::*;

pub const GOLD_COLOR: Color32 = Color32::from_rgb(255, 215, 0);
pub const SILVER_COLOR: Color32 = Color32::from_rgb(192, 192, 192);
pub const BRONZE_COLOR: Color32 = Color32::from_rgb(205, 127, 50);
const RANKING_COLOR: Color32 = Color32::from_rgb(68, 1, 84);

pub const HISTOGRAM_BINS: usize = 15;
const STACKED_ROWS: usize = 5;
const RANKED_ROWS: usize = 10;

/// Medal counts of the first rows, in input order, ready for stacked bars.
#[derive(Clone, Debug, Default)]
pub struct MedalStack {
    pub countries: Vec<String>,
    pub gold: Vec<f64>,
    pub silver: Vec<f64>,
    pub bronze: Vec<f64>,
}

/// Stated totals of the highest ranked rows, descending.
#[derive(Clone, Debug, Default)]
pub struct TotalRanking {
    pub countries: Vec<String>,
    pub totals: Vec<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Histogram {
    pub start: f64,
    pub width: f64,
    pub counts: Vec<usize>,
}

/// Everything the visualization sections draw, computed once per upload.
#[derive(Clone, Debug, Default)]
pub struct MedalCharts {
    pub stack: MedalStack,
    pub ranking: TotalRanking,
    pub gold: Histogram,
    pub silver: Histogram,
    pub bronze: Histogram,
}

impl MedalCharts {
    pub fn from_tally(df: &DataFrame) -> PolarsResult<Self> {
        Ok(Self {
            stack: medal_stack(df)?,
            ranking: total_ranking(df)?,
            gold: histogram(&sample_values(df, GOLD)?, HISTOGRAM_BINS),
            silver: histogram(&sample_values(df, SILVER)?, HISTOGRAM_BINS),
            bronze: histogram(&sample_values(df, BRONZE)?, HISTOGRAM_BINS),
        })
    }
}

pub fn medal_stack(df: &DataFrame) -> PolarsResult<MedalStack> {
    let head = df.head(Some(STACKED_ROWS));
    Ok(MedalStack {
        countries: labels(&head)?,
        gold: bar_values(&head, GOLD)?,
        silver: bar_values(&head, SILVER)?,
        bronze: bar_values(&head, BRONZE)?,
    })
}

pub fn total_ranking(df: &DataFrame) -> PolarsResult<TotalRanking> {
    let top = report::top_by_total(df, RANKED_ROWS)?;
    Ok(TotalRanking {
        countries: labels(&top)?,
        totals: bar_values(&top, TOTAL)?,
    })
}

fn labels(df: &DataFrame) -> PolarsResult<Vec<String>> {
    let country = df.column(COUNTRY)?;
    (0..df.height())
        .map(|i| Ok(format!("{}", country.get(i)?).replace('"', "")))
        .collect()
}

// Bars need one value per label, so a null cell draws as zero height. The
// row still shows up in the discrepancy table.
fn bar_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    Ok(df
        .column(name)?
        .i64()?
        .into_iter()
        .map(|v| v.unwrap_or(0) as f64)
        .collect())
}

// Histograms drop null cells instead.
fn sample_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    Ok(df
        .column(name)?
        .i64()?
        .into_iter()
        .flatten()
        .map(|v| v as f64)
        .collect())
}

pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    if values.is_empty() || bins == 0 {
        return Histogram::default();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        // All samples share one value. One bin centered on it.
        return Histogram {
            start: min - 0.5,
            width: 1.0,
            counts: vec![values.len()],
        };
    }
    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &value in values {
        let slot = (((value - min) / width) as usize).min(bins - 1);
        counts[slot] += 1;
    }
    Histogram {
        start: min,
        width,
        counts,
    }
}

fn axis_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 0.25 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

pub fn show_medal_stack(ui: &mut egui::Ui, stack: &MedalStack) {
    let bars = |values: &[f64]| -> Vec<Bar> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Bar::new(i as f64, *v).width(0.6).name(&stack.countries[i]))
            .collect()
    };
    let gold = BarChart::new(bars(&stack.gold)).name("Gold").color(GOLD_COLOR);
    let silver = BarChart::new(bars(&stack.silver))
        .name("Silver")
        .color(SILVER_COLOR)
        .stack_on(&[&gold]);
    let bronze = BarChart::new(bars(&stack.bronze))
        .name("Bronze")
        .color(BRONZE_COLOR)
        .stack_on(&[&gold, &silver]);

    let countries = stack.countries.clone();
    Plot::new("medal_stack")
        .legend(Legend::default())
        .height(280.0)
        .x_axis_formatter(move |mark: GridMark, _range| axis_label(&countries, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(gold);
            plot_ui.bar_chart(silver);
            plot_ui.bar_chart(bronze);
        });
}

pub fn show_total_ranking(ui: &mut egui::Ui, ranking: &TotalRanking) {
    let bars: Vec<Bar> = ranking
        .totals
        .iter()
        .enumerate()
        .map(|(i, v)| Bar::new(i as f64, *v).width(0.6).name(&ranking.countries[i]))
        .collect();
    let chart = BarChart::new(bars)
        .name("Total Medals")
        .color(RANKING_COLOR)
        .horizontal();

    let countries = ranking.countries.clone();
    Plot::new("total_ranking")
        .legend(Legend::default())
        .height(280.0)
        .y_axis_formatter(move |mark: GridMark, _range| axis_label(&countries, mark.value))
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

pub fn show_histogram(
    ui: &mut egui::Ui,
    id: &str,
    name: &str,
    color: Color32,
    hist: &Histogram,
) {
    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, count)| {
            let center = hist.start + hist.width * (i as f64 + 0.5);
            Bar::new(center, *count as f64).width(hist.width)
        })
        .collect();
    let chart = BarChart::new(bars).name(name).color(color);
    Plot::new(id)
        .legend(Legend::default())
        .height(220.0)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally() -> DataFrame {
        df!(
            COUNTRY => &["A", "B", "C", "D", "E", "F"],
            GOLD => &[10i64, 4, 7, 1, 0, 2],
            SILVER => &[5i64, 4, 2, 1, 0, 3],
            BRONZE => &[3i64, 4, 6, 1, 2, 2],
            TOTAL => &[18i64, 12, 15, 3, 2, 7],
        )
        .unwrap()
    }

    #[test]
    fn stack_takes_first_five_in_input_order() {
        let stack = medal_stack(&tally()).unwrap();
        assert_eq!(stack.countries, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(stack.gold, vec![10.0, 4.0, 7.0, 1.0, 0.0]);
        assert_eq!(stack.gold.len(), stack.silver.len());
        assert_eq!(stack.gold.len(), stack.bronze.len());
    }

    #[test]
    fn ranking_is_descending_by_total() {
        let ranking = total_ranking(&tally()).unwrap();
        assert_eq!(ranking.countries, vec!["A", "C", "B", "F", "D", "E"]);
        assert_eq!(ranking.totals[0], 18.0);
        assert_eq!(ranking.countries.len(), ranking.totals.len());
    }

    #[test]
    fn histogram_counts_cover_all_samples() {
        let values = vec![0.0, 1.0, 2.0, 2.0, 5.0, 9.0, 10.0];
        let hist = histogram(&values, HISTOGRAM_BINS);
        assert_eq!(hist.counts.len(), HISTOGRAM_BINS);
        assert_eq!(hist.counts.iter().sum::<usize>(), values.len());
        // The maximum lands in the last bin, not one past it.
        assert_eq!(*hist.counts.last().unwrap(), 1);
    }

    #[test]
    fn histogram_of_single_value_is_one_bin() {
        let hist = histogram(&[4.0, 4.0, 4.0], HISTOGRAM_BINS);
        assert_eq!(hist.counts, vec![3]);
    }

    #[test]
    fn histogram_of_nothing_is_empty() {
        assert_eq!(histogram(&[], HISTOGRAM_BINS), Histogram::default());
    }

    #[test]
    fn charts_tolerate_an_empty_tally() {
        let charts = MedalCharts::from_tally(&tally().head(Some(0))).unwrap();
        assert!(charts.stack.countries.is_empty());
        assert!(charts.ranking.totals.is_empty());
        assert!(charts.gold.counts.is_empty());
    }

    #[test]
    fn axis_labels_only_on_whole_marks() {
        let labels = vec!["A".to_owned(), "B".to_owned()];
        assert_eq!(axis_label(&labels, 0.0), "A");
        assert_eq!(axis_label(&labels, 1.1), "B");
        assert_eq!(axis_label(&labels, 0.5), "");
        assert_eq!(axis_label(&labels, 7.0), "");
        assert_eq!(axis_label(&labels, -1.0), "");
    }
}
