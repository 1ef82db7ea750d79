use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::export::ExportArtifact;
use crate::pages::Page;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the navigation sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();

    ui.label("Go to");
    for page in Page::ALL {
        ui.radio_value(&mut state.page, page, page.label());
    }

    ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui: &mut Ui| {
        ui.label(RichText::new("Sanrio Character Dashboard - Designed with ❤ using egui").small());
        ui.separator();
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = state.table() {
            ui.label(format!(
                "{} records, {} characters, {} years",
                table.len(),
                table.characters().len(),
                table.years().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::DARK_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open ranking data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

/// Ask where to save `artifact` and write it there.
pub fn save_file_dialog(state: &mut AppState, artifact: &ExportArtifact) {
    let file = rfd::FileDialog::new()
        .set_title("Save data")
        .set_file_name(artifact.file_name.as_str())
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.save_export(artifact, &path);
    }
}

/// Download button: encodes lazily and opens the save dialog on click.
pub fn download_button<F>(ui: &mut Ui, state: &mut AppState, label: &str, encode: F)
where
    F: FnOnce(&AppState) -> anyhow::Result<ExportArtifact>,
{
    if ui.button(label).clicked() {
        match encode(state) {
            Ok(artifact) => save_file_dialog(state, &artifact),
            Err(e) => {
                log::error!("Failed to encode export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
