use crate::chart::{self, MedalCharts};
use crate::error::TallyError;
use crate::report;
use crate::summary::TallySummary;
use crate::utils::display_dataframe;
use crate::validate::TallyReport;
use egui::{Color32, Grid, RichText, Window};
use polars::prelude::*;

/// One loaded tally with its validation report, shown as an egui window.
#[derive(Clone, Debug)]
pub struct TallyContainer {
    pub title: String,
    pub shape: (usize, usize),
    pub data: DataFrame,
    pub report: TallyReport,
    pub charts: MedalCharts,
    pub summary: TallySummary,
    pub preview_display: bool,
    pub dtypes_display: bool,
    pub nulls_display: bool,
    pub discrepancy_display: bool,
    pub is_open: bool,
}

impl TallyContainer {
    pub fn new(df: DataFrame, report: TallyReport, title: &str) -> Result<Self, TallyError> {
        let charts = MedalCharts::from_tally(&df)?;
        Ok(Self {
            title: String::from(title),
            shape: df.shape(),
            data: df,
            report,
            charts,
            summary: TallySummary::default(),
            preview_display: false,
            dtypes_display: false,
            nulls_display: false,
            discrepancy_display: false,
            is_open: true,
        })
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        let window = Window::new(format!("🗖 {}", &self.title));
        let mut is_open = std::mem::take(&mut self.is_open); // temporary move is_open out of self
                                                             // to allow the show_content call.

        window
            .open(&mut is_open)
            .vscroll(true)
            .hscroll(true)
            .auto_sized()
            .resizable(false)
            .show(ctx, |ui| self.show_content(ctx, ui));

        self.is_open = is_open; // put is_open back on self.
    }

    fn show_content(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        Grid::new("tally_grid")
            .num_columns(2)
            .spacing([40.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                ui.label("Shape: ");
                ui.label(format!("{:?}", &self.shape));
                ui.end_row();
                ui.label("Preview: ");
                if ui.button("View").clicked() {
                    self.preview_display = !self.preview_display;
                }
                if self.preview_display {
                    let head = report::preview(&self.data);
                    Window::new(format!("{}{}", String::from("Preview: "), &self.title))
                        .open(&mut self.preview_display)
                        .show(ctx, |ui| display_dataframe(&head, ui));
                }
                ui.end_row();
                ui.label("Data Types: ");
                if ui.button("View").clicked() {
                    self.dtypes_display = !self.dtypes_display;
                }
                if self.dtypes_display {
                    let dtypes_df = report::dtypes_frame(&self.data).unwrap_or_default();
                    Window::new(format!("{}{}", String::from("Data Types: "), &self.title))
                        .open(&mut self.dtypes_display)
                        .show(ctx, |ui| display_dataframe(&dtypes_df, ui));
                }
                ui.end_row();
                ui.label("Missing Values: ");
                if ui.button("View").clicked() {
                    self.nulls_display = !self.nulls_display;
                }
                if self.nulls_display {
                    let nulls = report::null_counts(&self.data);
                    Window::new(format!("{}{}", String::from("Missing Values: "), &self.title))
                        .open(&mut self.nulls_display)
                        .show(ctx, |ui| display_dataframe(&nulls, ui));
                }
                ui.end_row();
                ui.label("Summary: ");
                let btn = ui.button("View");
                if btn.clicked() {
                    self.summary.display = !&self.summary.display;
                    if self.summary.summary_data.is_none() {
                        self.summary.summary_data = report::summary(&self.data).ok();
                    }
                }
                if self.summary.display {
                    let binding = self.summary.summary_data.clone().unwrap_or_default();
                    Window::new(format!("{}{}", String::from("Summary: "), &self.title))
                        .open(&mut self.summary.display)
                        .vscroll(true)
                        .hscroll(true)
                        .show(ctx, |ui| display_dataframe(&binding, ui));
                }
                ui.end_row();
                ui.label("Total Medals: ");
                if self.report.is_clean() {
                    ui.label("No discrepancies found in the total medals calculation.");
                } else {
                    ui.horizontal(|ui| {
                        ui.colored_label(
                            Color32::RED,
                            format!(
                                "{} row(s) where the stated total differs",
                                self.report.inconsistent.height()
                            ),
                        );
                        if ui.button("View").clicked() {
                            self.discrepancy_display = !self.discrepancy_display;
                        }
                    });
                }
                if self.discrepancy_display {
                    Window::new(format!("{}{}", String::from("Discrepancies: "), &self.title))
                        .open(&mut self.discrepancy_display)
                        .show(ctx, |ui| display_dataframe(&self.report.inconsistent, ui));
                }
                ui.end_row();
            });
        ui.add_space(15.0);
        ui.label(RichText::new("Visualizations").text_style(egui::TextStyle::Heading));
        ui.collapsing("Medal Distribution (first 5 entries)", |ui| {
            chart::show_medal_stack(ui, &self.charts.stack);
        });
        ui.collapsing("Top 10 by Total Medals", |ui| {
            chart::show_total_ranking(ui, &self.charts.ranking);
        });
        ui.collapsing("Medal Count Distributions", |ui| {
            chart::show_histogram(ui, "gold_hist", "Gold", chart::GOLD_COLOR, &self.charts.gold);
            chart::show_histogram(
                ui,
                "silver_hist",
                "Silver",
                chart::SILVER_COLOR,
                &self.charts.silver,
            );
            chart::show_histogram(
                ui,
                "bronze_hist",
                "Bronze",
                chart::BRONZE_COLOR,
                &self.charts.bronze,
            );
        });
        ui.collapsing("Insights", |ui| {
            ui.label(self.insights());
        });
    }

    fn insights(&self) -> String {
        let mut lines = vec![format!("{} entries analyzed.", self.shape.0)];
        if let Some(leader) = self.charts.ranking.countries.first() {
            lines.push(format!("{leader} leads the tally by total medals."));
        }
        if self.report.is_clean() {
            lines.push(String::from(
                "Stated totals match the recomputed medal sums on every row.",
            ));
        } else {
            lines.push(format!(
                "{} row(s) state a total that differs from the medal sum.",
                self.report.inconsistent.height()
            ));
        }
        lines.join(" ")
    }
}
