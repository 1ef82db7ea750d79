use std::path::Path;
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::export::ExportArtifact;
use crate::data::loader::load_file;
use crate::data::model::{DatasetHandle, Table};
use crate::pages::character::CharacterSelection;
use crate::pages::insights::InsightsSelection;
use crate::pages::overview::OverviewSelection;
use crate::pages::Page;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<DatasetHandle>,

    /// Page shown in the central panel.
    pub page: Page,

    /// Per-page selections.
    pub overview: OverviewSelection,
    pub character: CharacterSelection,
    pub insights: InsightsSelection,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, dataset: Option<DatasetHandle>) -> Self {
        let mut state = Self {
            config,
            dataset: None,
            page: Page::default(),
            overview: OverviewSelection::default(),
            character: CharacterSelection::default(),
            insights: InsightsSelection::default(),
            status_message: None,
        };
        if let Some(ds) = dataset {
            state.set_dataset(ds);
        }
        state
    }

    /// Swap in a newly loaded dataset and reset every selection.
    pub fn set_dataset(&mut self, dataset: DatasetHandle) {
        self.overview = OverviewSelection::default();
        self.character = CharacterSelection::default();
        self.insights = InsightsSelection::default();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.validate_selections();
    }

    /// Snap every page's selection into the current table's domain.
    pub fn validate_selections(&mut self) {
        let Some(ds) = self.dataset.clone() else {
            return;
        };
        self.overview.validate(&ds);
        self.character.validate(&ds);
        self.insights.validate(&ds, &self.config);
    }

    /// Load a file; failures are reported in the status line and leave the
    /// current dataset in place.
    pub fn open(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => self.set_dataset(Arc::new(table)),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn table(&self) -> Option<&Table> {
        self.dataset.as_deref()
    }

    /// Write an export to `path`, reporting the result in the status line.
    pub fn save_export(&mut self, artifact: &ExportArtifact, path: &Path) {
        match artifact.save(path) {
            Ok(()) => {
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to save export: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::fixtures::small_table;

    #[test]
    fn new_state_validates_selections() {
        let state = AppState::new(DashboardConfig::default(), Some(Arc::new(small_table())));
        assert_eq!(state.overview.year, Some(1990));
        assert_eq!(state.character.character.as_deref(), Some("HelloKitty"));
        assert!(!state.insights.filter.years.is_empty());
        assert_eq!(state.page, Page::Overview);
    }

    #[test]
    fn failed_open_keeps_dataset() {
        let mut state = AppState::new(DashboardConfig::default(), Some(Arc::new(small_table())));
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Character Name,Year").unwrap();
        state.open(file.path());
        assert_eq!(state.table().map(Table::len), Some(3));
        let msg = state.status_message.as_deref().unwrap();
        assert!(msg.contains("missing required column 'Rank'"), "{msg}");
    }

    #[test]
    fn open_replaces_dataset_and_resets_selection() {
        let mut state = AppState::new(DashboardConfig::default(), Some(Arc::new(small_table())));
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(
            file,
            "Character Name,Year,Rank,Highest Rank,Lowest Rank,Total Times Ranked,Debut"
        )
        .unwrap();
        writeln!(file, "Pochacco,2012,3,2,9,6,1989").unwrap();
        state.open(file.path());
        assert_eq!(state.table().map(Table::len), Some(1));
        assert_eq!(state.overview.year, Some(2012));
        assert_eq!(state.character.character.as_deref(), Some("Pochacco"));
        assert!(state.status_message.is_none());
    }
}
