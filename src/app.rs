use crate::container::TallyContainer;
use crate::error::TallyError;
use crate::{tally, validate};
use rfd::FileDialog;
use std::path::Path;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Debug)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct App {
    label: String,
    // this how you opt-out of serialization of a member
    #[serde(skip)]
    container: Option<TallyContainer>,
    #[serde(skip)]
    load_error: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            label: "Medal Tally GUI".to_owned(),
            container: None,
            load_error: None,
        }
    }
}

impl App {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // This is also where you can customize the look and feel of egui using
        // `cc.egui_ctx.set_visuals` and `cc.egui_ctx.set_fonts`.

        // Load previous app state (if any).
        // Note that you must enable the `persistence` feature for this to work.
        //if let Some(storage) = cc.storage {
        //    return eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default();
        //}
        Default::default()
    }

    // One upload, one linear pass. A new file replaces the previous
    // container and clears any earlier load failure.
    fn open_tally(&mut self) {
        let Some(path) = FileDialog::new().add_filter("CSV", &["csv"]).pick_file() else {
            return;
        };
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("tally.csv")
            .to_owned();
        match load_container(&path, &file_name) {
            Ok(container) => {
                log::info!(
                    "loaded {}: {} rows, {} columns",
                    file_name,
                    container.shape.0,
                    container.shape.1
                );
                if !container.report.is_clean() {
                    log::warn!(
                        "{}: {} row(s) with total medal discrepancies",
                        file_name,
                        container.report.inconsistent.height()
                    );
                }
                self.container = Some(container);
                self.load_error = None;
            }
            Err(err) => {
                log::error!("failed to load {}: {}", file_name, err);
                self.container = None;
                self.load_error = Some(err.to_string());
            }
        }
    }
}

fn load_container(path: &Path, title: &str) -> Result<TallyContainer, TallyError> {
    let df = tally::read_tally_file(path)?;
    let checked = validate::with_check_columns(df)?;
    let report = validate::partition(&checked)?;
    TallyContainer::new(checked, report, title)
}

impl eframe::App for App {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            // The top panel is often a good place for a menu bar:
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open CSV…").clicked() {
                        self.open_tally();
                        ui.close_menu();
                    }
                });
                ui.menu_button("App", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = &self.load_error {
                ui.colored_label(egui::Color32::RED, format!("Load failed: {error}"));
                ui.label("Fix the file and upload it again.");
            } else if self.container.is_none() {
                ui.label("Upload a medal tally CSV (File > Open CSV…) to start analyzing.");
            }
            egui::warn_if_debug_build(ui);
        });

        if let Some(container) = &mut self.container {
            container.show(ctx);
        }
    }
}
