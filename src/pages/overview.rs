use anyhow::Result;

use super::{BarData, ChartKind, ChartSpec, Outcome};
use crate::config::DashboardConfig;
use crate::data::aggregate::{distinct_character_count, most_frequent_top_rank, top_n_by_rank};
use crate::data::export::{csv_artifact, ExportArtifact};
use crate::data::filter::filter_by_year;
use crate::data::model::{Table, COL_CHARACTER, COL_RANK};

pub const NO_DATA_NOTICE: &str = "No data available for the selected year.";

/// Shown when no record holds rank 1.
pub const NOT_AVAILABLE: &str = "N/A";

/// Year selectbox and character selectbox.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverviewSelection {
    pub year: Option<i32>,
    pub character: Option<String>,
}

impl OverviewSelection {
    /// Snap both choices into the table's domain, defaulting to the first
    /// sorted value.
    pub fn validate(&mut self, table: &Table) {
        let years = table.years();
        if !self.year.is_some_and(|y| years.contains(&y)) {
            self.year = years.first().copied();
        }
        let characters = table.characters();
        if !self.character.as_ref().is_some_and(|c| characters.contains(c)) {
            self.character = characters.into_iter().next();
        }
    }
}

/// Whole-table headline numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kpis {
    pub unique_characters: usize,
    pub top_rank_character: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewView {
    pub year: i32,
    /// Records for the selected year, source order.
    pub filtered: Table,
    pub chart: BarData,
    pub top: Table,
    pub kpis: Kpis,
}

impl OverviewView {
    /// Caption under the year chart.
    pub fn caption(&self) -> String {
        format!("{} characters ranked in {}", self.filtered.len(), self.year)
    }

    /// The year-filtered table as `filtered_sanrio_data.csv`.
    pub fn export(&self, config: &DashboardConfig) -> Result<ExportArtifact> {
        csv_artifact(&self.filtered, &config.overview_export_name)
    }
}

pub fn kpis(table: &Table) -> Kpis {
    let top_rank_character = match most_frequent_top_rank(table) {
        Ok(name) => name,
        Err(e) => {
            log::warn!("{e}; showing {NOT_AVAILABLE}");
            NOT_AVAILABLE.to_string()
        }
    };
    Kpis {
        unique_characters: distinct_character_count(table),
        top_rank_character,
    }
}

pub fn build(table: &Table, selection: &OverviewSelection, config: &DashboardConfig) -> Outcome<OverviewView> {
    let Some(year) = selection.year else {
        return Outcome::NoData(NO_DATA_NOTICE.to_string());
    };

    let filtered = filter_by_year(table, year);
    log::debug!("overview year={year} -> {} rows", filtered.len());
    if filtered.is_empty() {
        log::warn!("overview: no records for {year}");
        return Outcome::NoData(NO_DATA_NOTICE.to_string());
    }

    let labels: Vec<String> = filtered.iter().map(|r| r.character.clone()).collect();
    let values: Vec<f64> = filtered.iter().map(|r| f64::from(r.rank)).collect();
    let highlight = selection
        .character
        .as_ref()
        .and_then(|c| labels.iter().position(|l| l == c));

    let chart = BarData {
        spec: ChartSpec::new(ChartKind::Bar, format!("Ranking for {year}"), COL_CHARACTER, COL_RANK),
        labels,
        values,
        highlight,
    };

    Outcome::Ready(OverviewView {
        year,
        top: top_n_by_rank(&filtered, config.top_n),
        filtered,
        chart,
        kpis: kpis(table),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv_reader;
    use crate::data::model::fixtures::{record, small_table};

    #[test]
    fn validate_defaults_to_first_values() {
        let mut sel = OverviewSelection::default();
        sel.validate(&small_table());
        assert_eq!(sel.year, Some(1990));
        assert_eq!(sel.character.as_deref(), Some("HelloKitty"));
    }

    #[test]
    fn validate_replaces_out_of_domain_choices() {
        let mut sel = OverviewSelection {
            year: Some(1850),
            character: Some("Kuromi".into()),
        };
        sel.validate(&small_table());
        assert_eq!(sel.year, Some(1990));
        assert_eq!(sel.character.as_deref(), Some("Kuromi"));
    }

    #[test]
    fn builds_year_view() {
        let sel = OverviewSelection {
            year: Some(1990),
            character: Some("Kuromi".into()),
        };
        let view = build(&small_table(), &sel, &DashboardConfig::default())
            .ready()
            .unwrap();
        assert_eq!(view.filtered.len(), 2);
        assert_eq!(view.chart.labels, vec!["HelloKitty", "Kuromi"]);
        assert_eq!(view.chart.values, vec![1.0, 5.0]);
        assert_eq!(view.chart.highlight, Some(1));
        assert_eq!(view.chart.spec.title, "Ranking for 1990");
        assert_eq!(view.caption(), "2 characters ranked in 1990");
        assert_eq!(view.kpis.unique_characters, 2);
        assert_eq!(view.kpis.top_rank_character, "HelloKitty");
    }

    #[test]
    fn top_table_is_limited_and_sorted() {
        let rows = (1..=12)
            .rev()
            .map(|rank| record(&format!("C{rank:02}"), 2000, rank, 1, 20, 1))
            .collect();
        let table = Table::new(rows);
        let sel = OverviewSelection {
            year: Some(2000),
            character: None,
        };
        let view = build(&table, &sel, &DashboardConfig::default()).ready().unwrap();
        assert_eq!(view.top.len(), 10);
        assert_eq!(view.top.records()[0].rank, 1);
        assert_eq!(view.top.records()[9].rank, 10);
    }

    #[test]
    fn missing_year_gives_notice() {
        let sel = OverviewSelection {
            year: Some(2024),
            character: None,
        };
        let outcome = build(&small_table(), &sel, &DashboardConfig::default());
        assert_eq!(outcome, Outcome::NoData(NO_DATA_NOTICE.to_string()));
    }

    #[test]
    fn empty_table_gives_notice() {
        let mut sel = OverviewSelection::default();
        sel.validate(&Table::default());
        let outcome = build(&Table::default(), &sel, &DashboardConfig::default());
        assert!(!outcome.is_ready());
    }

    #[test]
    fn kpi_falls_back_without_rank_one() {
        let table = Table::new(vec![record("Kuromi", 2000, 2, 2, 9, 1)]);
        assert_eq!(kpis(&table).top_rank_character, NOT_AVAILABLE);
    }

    #[test]
    fn export_reparses_to_filtered_rows() {
        let sel = OverviewSelection {
            year: Some(1990),
            character: None,
        };
        let config = DashboardConfig::default();
        let view = build(&small_table(), &sel, &config).ready().unwrap();
        let artifact = view.export(&config).unwrap();
        assert_eq!(artifact.file_name, "filtered_sanrio_data.csv");
        let reloaded = load_csv_reader(artifact.bytes.as_slice()).unwrap();
        assert_eq!(reloaded, view.filtered);
    }
}
