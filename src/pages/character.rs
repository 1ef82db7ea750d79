use super::{ChartKind, ChartSpec, HeatmapData, LineData, LineSeries, Outcome};
use crate::data::aggregate::{per_character_extremes, rank_pivot, CharacterExtremes};
use crate::data::filter::filter_by_character;
use crate::data::model::{Record, Table, COL_CHARACTER, COL_RANK, COL_YEAR};

pub const NO_DATA_NOTICE: &str = "No data available for the selected character.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterSelection {
    pub character: Option<String>,
}

impl CharacterSelection {
    pub fn validate(&mut self, table: &Table) {
        let characters = table.characters();
        if !self.character.as_ref().is_some_and(|c| characters.contains(c)) {
            self.character = characters.into_iter().next();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterView {
    pub character: String,
    /// The character's records ordered by year.
    pub history: Table,
    pub trend: LineData,
    /// Rank matrix over the whole table, not only this character.
    pub heatmap: HeatmapData,
    pub extremes: CharacterExtremes,
}

pub fn build(table: &Table, selection: &CharacterSelection) -> Outcome<CharacterView> {
    let Some(character) = selection.character.clone() else {
        return Outcome::NoData(NO_DATA_NOTICE.to_string());
    };

    let mut rows: Vec<Record> = filter_by_character(table, &character).records().to_vec();
    log::debug!("character={character} -> {} rows", rows.len());
    if rows.is_empty() {
        log::warn!("no records for character {character}");
        return Outcome::NoData(NO_DATA_NOTICE.to_string());
    }
    rows.sort_by_key(|r| r.year);
    let history = Table::new(rows);

    let trend = LineData {
        spec: ChartSpec::new(
            ChartKind::Line,
            format!("{character} Performance Over Time"),
            COL_YEAR,
            COL_RANK,
        ),
        series: vec![LineSeries {
            name: character.clone(),
            points: history
                .iter()
                .map(|r| [f64::from(r.year.year()), f64::from(r.rank)])
                .collect(),
        }],
    };

    let heatmap = HeatmapData {
        spec: ChartSpec::new(
            ChartKind::Heatmap,
            "Rank Heatmap by Year and Character",
            COL_YEAR,
            COL_CHARACTER,
        )
        .colored_by(COL_RANK),
        pivot: rank_pivot(table),
    };

    Outcome::Ready(CharacterView {
        extremes: per_character_extremes(&history, &character),
        character,
        history,
        trend,
        heatmap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, small_table};

    #[test]
    fn validate_picks_first_character() {
        let mut sel = CharacterSelection {
            character: Some("Nobody".into()),
        };
        sel.validate(&small_table());
        assert_eq!(sel.character.as_deref(), Some("HelloKitty"));
    }

    #[test]
    fn trend_is_ordered_by_year() {
        let table = Table::new(vec![
            record("Kuromi", 2003, 2, 1, 9, 3),
            record("HelloKitty", 2001, 1, 1, 9, 3),
            record("Kuromi", 2001, 6, 1, 9, 3),
            record("Kuromi", 2002, 4, 1, 9, 3),
        ]);
        let sel = CharacterSelection {
            character: Some("Kuromi".into()),
        };
        let view = build(&table, &sel).ready().unwrap();
        assert_eq!(
            view.trend.series[0].points,
            vec![[2001.0, 6.0], [2002.0, 4.0], [2003.0, 2.0]]
        );
        assert_eq!(view.trend.spec.title, "Kuromi Performance Over Time");
        let years: Vec<i32> = view.history.iter().map(|r| r.year.year()).collect();
        assert_eq!(years, vec![2001, 2002, 2003]);
        assert_eq!(view.extremes.highest_rank, Some(1));
        assert_eq!(view.extremes.lowest_rank, Some(9));
        assert_eq!(view.extremes.total_times_ranked, 9);
        assert_eq!(view.heatmap.pivot.characters, vec!["HelloKitty", "Kuromi"]);
    }

    #[test]
    fn unknown_character_gives_notice() {
        let sel = CharacterSelection {
            character: Some("Pochacco".into()),
        };
        assert_eq!(
            build(&small_table(), &sel),
            Outcome::NoData(NO_DATA_NOTICE.to_string())
        );
    }
}
