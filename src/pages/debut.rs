use std::collections::BTreeMap;

use super::{BarData, ChartKind, ChartSpec, HistogramData, Outcome, ScatterData, ScatterGroup};
use crate::config::DashboardConfig;
use crate::data::aggregate::{debut_histogram, total_ranked_by_character};
use crate::data::model::{Table, COL_CHARACTER, COL_DEBUT, COL_HIGHEST_RANK, COL_TOTAL_TIMES_RANKED};

pub const NO_DATA_NOTICE: &str = "No data available.";

#[derive(Debug, Clone, PartialEq)]
pub struct DebutView {
    pub histogram: HistogramData,
    pub totals: BarData,
    pub scatter: ScatterData,
}

pub fn build(table: &Table, config: &DashboardConfig) -> Outcome<DebutView> {
    if table.is_empty() {
        return Outcome::NoData(NO_DATA_NOTICE.to_string());
    }

    let histogram = HistogramData {
        spec: ChartSpec::new(
            ChartKind::Histogram,
            "Distribution of Characters by Debut Year",
            COL_DEBUT,
            "count",
        ),
        bins: debut_histogram(table, config.histogram_bins),
    };

    let (labels, values): (Vec<String>, Vec<f64>) = total_ranked_by_character(table)
        .into_iter()
        .map(|(name, total)| (name, total as f64))
        .unzip();
    let totals = BarData {
        spec: ChartSpec::new(
            ChartKind::Bar,
            "Total Years Ranked by Character",
            COL_CHARACTER,
            COL_TOTAL_TIMES_RANKED,
        ),
        labels,
        values,
        highlight: None,
    };

    // One point group per Highest Rank so the renderer can colour by it.
    let mut grouped: BTreeMap<u32, Vec<[f64; 2]>> = BTreeMap::new();
    for r in table {
        grouped
            .entry(r.highest_rank)
            .or_default()
            .push([f64::from(r.debut.year()), f64::from(r.total_times_ranked)]);
    }
    let scatter = ScatterData {
        spec: ChartSpec::new(
            ChartKind::Scatter,
            "Debut Year vs. Total Times Ranked",
            COL_DEBUT,
            COL_TOTAL_TIMES_RANKED,
        )
        .colored_by(COL_HIGHEST_RANK),
        groups: grouped
            .into_iter()
            .map(|(key, points)| ScatterGroup { key, points })
            .collect(),
    };

    Outcome::Ready(DebutView {
        histogram,
        totals,
        scatter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::small_table;

    #[test]
    fn builds_all_three_charts() {
        let view = build(&small_table(), &DashboardConfig::default())
            .ready()
            .unwrap();
        assert_eq!(view.histogram.bins.len(), 20);
        assert_eq!(view.totals.labels, vec!["HelloKitty", "Kuromi"]);
        assert_eq!(view.totals.values, vec![20.0, 4.0]);

        let keys: Vec<u32> = view.scatter.groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec![1, 3]);
        assert_eq!(view.scatter.groups[0].points.len(), 2);
        assert_eq!(view.scatter.groups[1].points, vec![[1974.0, 4.0]]);
    }

    #[test]
    fn empty_table_gives_notice() {
        assert!(!build(&Table::default(), &DashboardConfig::default()).is_ready());
    }
}
