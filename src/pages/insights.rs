use std::collections::BTreeMap;

use anyhow::Result;

use super::{ChartKind, ChartSpec, LineData, LineSeries, Outcome};
use crate::config::DashboardConfig;
use crate::data::aggregate::top_three_frequency;
use crate::data::export::{csv_artifact, ExportArtifact};
use crate::data::filter::InsightsFilter;
use crate::data::model::{Table, COL_CHARACTER, COL_RANK, COL_YEAR};

pub const NO_DATA_NOTICE: &str = "No data available for the selected filters.";

/// Year and character multiselects.
///
/// The first `validate` seeds the defaults; later calls only drop values
/// that left the domain, so an emptied multiselect stays empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsightsSelection {
    pub filter: InsightsFilter,
    seeded: bool,
}

impl InsightsSelection {
    pub fn validate(&mut self, table: &Table, config: &DashboardConfig) {
        if !self.seeded {
            let n = config.default_selection_len;
            self.filter = InsightsFilter {
                years: table.years_in_order().into_iter().take(n).collect(),
                characters: table.head(n).iter().map(|r| r.character.clone()).collect(),
            };
            self.seeded = true;
            return;
        }
        let years = table.years();
        let characters = table.characters();
        self.filter.years.retain(|y| years.contains(y));
        self.filter.characters.retain(|c| characters.contains(c));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub filtered: Table,
    pub chart: LineData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsightsView {
    pub comparison: Outcome<Comparison>,
    /// Characters with the most top-3 finishes across the whole table.
    pub takeaways: Vec<(String, usize)>,
}

impl InsightsView {
    /// The filtered rows as `custom_insights.csv`; `None` when nothing matched.
    pub fn export(&self, config: &DashboardConfig) -> Option<Result<ExportArtifact>> {
        match &self.comparison {
            Outcome::Ready(c) => Some(csv_artifact(&c.filtered, &config.insights_export_name)),
            Outcome::NoData(_) => None,
        }
    }
}

pub fn build(table: &Table, selection: &InsightsSelection) -> InsightsView {
    let filtered = selection.filter.apply(table);

    let comparison = if filtered.is_empty() {
        log::warn!("custom insights: selection matched no records");
        Outcome::NoData(NO_DATA_NOTICE.to_string())
    } else {
        let mut by_character: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
        for r in &filtered {
            by_character
                .entry(r.character.as_str())
                .or_default()
                .push([f64::from(r.year.year()), f64::from(r.rank)]);
        }
        let series = by_character
            .into_iter()
            .map(|(name, mut points)| {
                points.sort_by(|a, b| a[0].total_cmp(&b[0]));
                LineSeries {
                    name: name.to_string(),
                    points,
                }
            })
            .collect();

        let chart = LineData {
            spec: ChartSpec::new(ChartKind::Line, "Comparison of Popularity Trends", COL_YEAR, COL_RANK)
                .colored_by(COL_CHARACTER),
            series,
        };
        Outcome::Ready(Comparison { filtered, chart })
    };

    InsightsView {
        comparison,
        takeaways: top_three_frequency(table),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::model::fixtures::{record, small_table};

    fn wide_table() -> Table {
        let mut rows = Vec::new();
        for (i, name) in ["F", "E", "D", "C", "B", "A"].iter().enumerate() {
            for year in [2005, 2001, 2002, 2003, 2004, 2000] {
                rows.push(record(name, year, i as u32 + 1, 1, 9, 6));
            }
        }
        Table::new(rows)
    }

    #[test]
    fn first_validate_seeds_defaults() {
        let mut sel = InsightsSelection::default();
        sel.validate(&wide_table(), &DashboardConfig::default());
        let years: Vec<i32> = sel.filter.years.iter().copied().collect();
        assert_eq!(years, vec![2001, 2002, 2003, 2004, 2005]);
        let names: Vec<&str> = sel.filter.characters.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["F"]);
    }

    #[test]
    fn later_validate_keeps_user_choice() {
        let table = small_table();
        let config = DashboardConfig::default();
        let mut sel = InsightsSelection::default();
        sel.validate(&table, &config);
        sel.filter.characters.clear();
        sel.filter.years.insert(1850);
        sel.validate(&table, &config);
        assert!(sel.filter.characters.is_empty());
        assert!(!sel.filter.years.contains(&1850));
    }

    #[test]
    fn comparison_has_one_series_per_character() {
        let mut sel = InsightsSelection::default();
        sel.filter = InsightsFilter {
            years: [1990, 1991].into_iter().collect(),
            characters: ["HelloKitty".to_string(), "Kuromi".to_string()]
                .into_iter()
                .collect(),
        };
        let view = build(&small_table(), &sel);
        let comparison = view.comparison.ready().unwrap();
        assert_eq!(comparison.filtered.len(), 3);
        assert_eq!(comparison.chart.series.len(), 2);
        assert_eq!(
            comparison.chart.series[0].points,
            vec![[1990.0, 1.0], [1991.0, 2.0]]
        );
    }

    #[test]
    fn empty_selection_gives_notice_but_keeps_takeaways() {
        let mut sel = InsightsSelection::default();
        sel.filter.characters = BTreeSet::new();
        let view = build(&small_table(), &sel);
        assert_eq!(view.comparison, Outcome::NoData(NO_DATA_NOTICE.to_string()));
        assert_eq!(view.takeaways, vec![("HelloKitty".to_string(), 2)]);
        assert!(view.export(&DashboardConfig::default()).is_none());
    }

    #[test]
    fn export_uses_insights_file_name() {
        let mut sel = InsightsSelection::default();
        sel.filter = InsightsFilter {
            years: [1990].into_iter().collect(),
            characters: ["Kuromi".to_string()].into_iter().collect(),
        };
        let view = build(&small_table(), &sel);
        let artifact = view.export(&DashboardConfig::default()).unwrap().unwrap();
        assert_eq!(artifact.file_name, "custom_insights.csv");
        let text = String::from_utf8(artifact.bytes).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
