use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Static settings for one dashboard session.
///
/// Built once in `main` and handed to the app; pages read it but never
/// change it.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Dataset loaded at startup.
    pub data_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Bucket count for the debut-year histogram.
    pub histogram_bins: usize,
    /// Rows in the overview "top characters" table.
    pub top_n: usize,
    /// How many years / characters Custom Insights preselects.
    pub default_selection_len: usize,
    pub overview_export_name: String,
    pub insights_export_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("cleaned_SanrioRank.csv"),
            window_size: [1280.0, 860.0],
            min_window_size: [720.0, 480.0],
            histogram_bins: 20,
            top_n: 10,
            default_selection_len: 5,
            overview_export_name: "filtered_sanrio_data.csv".to_string(),
            insights_export_name: "custom_insights.csv".to_string(),
        }
    }
}
