use eframe::egui::{self, ScrollArea, Ui};

use crate::pages::Page;
use crate::state::AppState;
use crate::ui::{pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SanrioDashboardApp {
    pub state: AppState,
}

impl SanrioDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SanrioDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("navigation_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| show_page(ui, &mut self.state));
        });
    }
}

fn show_page(ui: &mut Ui, state: &mut AppState) {
    let Some(table) = state.dataset.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a ranking file to start  (File → Open…)");
        });
        return;
    };

    state.validate_selections();
    match state.page {
        Page::Overview => pages::overview_page(ui, state, &table),
        Page::CharacterPerformance => pages::character_page(ui, state, &table),
        Page::DebutLongevity => pages::debut_page(ui, state, &table),
        Page::CustomInsights => pages::insights_page(ui, state, &table),
    }
}
