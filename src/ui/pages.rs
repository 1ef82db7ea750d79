use std::collections::BTreeSet;
use std::fmt::Display;

use eframe::egui::{self, RichText, Ui};

use super::panels::download_button;
use super::plot;
use crate::data::model::{
    Table, COL_CHARACTER, COL_HIGHEST_RANK, COL_LOWEST_RANK, COL_RANK, COL_TOTAL_TIMES_RANKED,
    COL_YEAR,
};
use crate::pages::{character, debut, insights, overview, Outcome, Page};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Selection widgets
// ---------------------------------------------------------------------------

/// Single-value selectbox over `options`.
fn select_box<T>(ui: &mut Ui, id: &str, label: &str, options: &[T], current: &mut Option<T>)
where
    T: Clone + PartialEq + Display,
{
    ui.label(label);
    let text = current.as_ref().map(|v| v.to_string()).unwrap_or_default();
    egui::ComboBox::from_id_salt(id)
        .selected_text(text)
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                ui.selectable_value(current, Some(option.clone()), option.to_string());
            }
        });
}

/// Checkbox list with All / None shortcuts.
fn multi_select<T>(ui: &mut Ui, id: &str, label: &str, options: &[T], selected: &mut BTreeSet<T>)
where
    T: Clone + Ord + Display,
{
    let header = format!("{label}  ({}/{})", selected.len(), options.len());
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(id)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    selected.extend(options.iter().cloned());
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                }
            });
            for option in options {
                let mut checked = selected.contains(option);
                if ui.checkbox(&mut checked, option.to_string()).changed() {
                    if checked {
                        selected.insert(option.clone());
                    } else {
                        selected.remove(option);
                    }
                }
            }
        });
}

/// Show the notice for an empty outcome and hand back a ready view.
fn shown<T>(ui: &mut Ui, outcome: Outcome<T>) -> Option<T> {
    if let Outcome::NoData(text) = &outcome {
        plot::notice(ui, text);
    }
    outcome.ready()
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

pub fn overview_page(ui: &mut Ui, state: &mut AppState, table: &Table) {
    ui.heading(Page::Overview.title());

    let years = table.years();
    let characters = table.characters();
    ui.horizontal(|ui: &mut Ui| {
        select_box(ui, "overview_year", "Select Year", &years, &mut state.overview.year);
        ui.add_space(16.0);
        select_box(
            ui,
            "overview_character",
            "Filter by Character",
            &characters,
            &mut state.overview.character,
        );
    });

    let Some(view) = shown(ui, overview::build(table, &state.overview, &state.config)) else {
        return;
    };

    plot::bar_chart(ui, &view.chart);
    ui.label(RichText::new(view.caption()).small());

    ui.add_space(8.0);
    ui.heading(format!("Top {} Characters Summary", state.config.top_n));
    plot::record_table(
        ui,
        "overview_top",
        &view.top,
        &[
            COL_CHARACTER,
            COL_RANK,
            COL_HIGHEST_RANK,
            COL_LOWEST_RANK,
            COL_TOTAL_TIMES_RANKED,
        ],
    );

    ui.add_space(8.0);
    ui.heading("Summary Statistics");
    ui.columns(2, |cols| {
        plot::metric(
            &mut cols[0],
            "Total Unique Characters",
            &view.kpis.unique_characters.to_string(),
        );
        plot::metric(
            &mut cols[1],
            "Most Frequent No.1 Character",
            &view.kpis.top_rank_character,
        );
    });

    ui.add_space(8.0);
    download_button(ui, state, "Download Filtered Data", |s| view.export(&s.config));
}

pub fn character_page(ui: &mut Ui, state: &mut AppState, table: &Table) {
    ui.heading(Page::CharacterPerformance.title());

    let characters = table.characters();
    ui.horizontal(|ui: &mut Ui| {
        select_box(
            ui,
            "character_select",
            "Select Character",
            &characters,
            &mut state.character.character,
        );
    });

    let Some(view) = shown(ui, character::build(table, &state.character)) else {
        return;
    };

    plot::line_chart(ui, &view.trend);
    plot::heatmap(ui, &view.heatmap);

    ui.add_space(8.0);
    ui.heading(format!("{}'s Performance Overview", view.character));
    let show = |v: Option<u32>| v.map_or_else(|| "-".to_string(), |n| n.to_string());
    ui.columns(3, |cols| {
        plot::metric(&mut cols[0], "Highest Rank Achieved", &show(view.extremes.highest_rank));
        plot::metric(&mut cols[1], "Lowest Rank Achieved", &show(view.extremes.lowest_rank));
        plot::metric(
            &mut cols[2],
            "Total Times Ranked",
            &view.extremes.total_times_ranked.to_string(),
        );
    });

    ui.add_space(8.0);
    egui::CollapsingHeader::new("Yearly Rankings")
        .id_salt("character_history")
        .show(ui, |ui: &mut Ui| {
            plot::record_table(
                ui,
                "character_history_table",
                &view.history,
                &[COL_YEAR, COL_RANK, COL_HIGHEST_RANK, COL_LOWEST_RANK],
            );
        });
}

pub fn debut_page(ui: &mut Ui, state: &mut AppState, table: &Table) {
    ui.heading(Page::DebutLongevity.title());

    let Some(view) = shown(ui, debut::build(table, &state.config)) else {
        return;
    };

    plot::histogram(ui, &view.histogram);
    plot::bar_chart(ui, &view.totals);
    plot::scatter(ui, &view.scatter);
}

pub fn insights_page(ui: &mut Ui, state: &mut AppState, table: &Table) {
    ui.heading(Page::CustomInsights.title());

    let years = table.years();
    let characters = table.characters();
    multi_select(ui, "insights_years", "Select Years", &years, &mut state.insights.filter.years);
    multi_select(
        ui,
        "insights_characters",
        "Select Characters",
        &characters,
        &mut state.insights.filter.characters,
    );

    let view = insights::build(table, &state.insights);
    match &view.comparison {
        Outcome::Ready(comparison) => plot::line_chart(ui, &comparison.chart),
        Outcome::NoData(text) => plot::notice(ui, text),
    }

    ui.add_space(8.0);
    ui.heading("Key Takeaways");
    ui.label("Characters with consistently high rankings:");
    plot::frequency_table(ui, "insights_takeaways", &view.takeaways);

    if view.comparison.is_ready() {
        ui.add_space(8.0);
        download_button(ui, state, "Download Insights Data", |s| {
            view.export(&s.config)
                .unwrap_or_else(|| Err(anyhow::anyhow!("no rows to export")))
        });
    }
}
