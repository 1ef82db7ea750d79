mod app;
mod color;
mod config;
mod data;
mod error;
mod pages;
mod state;
mod ui;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use app::SanrioDashboardApp;
use config::DashboardConfig;
use data::model::DatasetHandle;
use eframe::egui;
use error::DataError;
use state::AppState;

/// Load the default dataset. A missing file starts an empty dashboard; a
/// malformed one aborts startup.
fn load_startup_dataset(path: &Path) -> Result<Option<DatasetHandle>> {
    if !path.exists() {
        log::warn!("{} not found; use File → Open… to load data", path.display());
        return Ok(None);
    }
    let table = data::loader::load_file(path)?;
    Ok(Some(Arc::new(table)))
}

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();
    let dataset = load_startup_dataset(&config.data_path).inspect_err(|e| {
        match e.downcast_ref::<DataError>() {
            Some(de) if de.is_parse() => log::error!("Malformed dataset, aborting: {e:#}"),
            _ => log::error!("Failed to load startup dataset: {e:#}"),
        }
    })?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let state = AppState::new(config, dataset);
    eframe::run_native(
        "Sanrio Character Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(SanrioDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_startup_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_startup_dataset(&dir.path().join("cleaned_SanrioRank.csv")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn malformed_startup_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned_SanrioRank.csv");
        std::fs::write(
            &path,
            "Character Name,Year,Rank,Highest Rank,Lowest Rank,Total Times Ranked,Debut\nKuromi,05,1,1,1,1,2005\n",
        )
        .unwrap();
        let err = load_startup_dataset(&path).unwrap_err();
        assert!(err
            .downcast_ref::<DataError>()
            .is_some_and(|e| e.is_parse()));
    }
}
