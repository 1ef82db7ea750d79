use std::collections::BTreeSet;

use super::model::{Record, Table};

// ---------------------------------------------------------------------------
// Single-predicate filters
// ---------------------------------------------------------------------------
//
// All filters are order-preserving and leave the source table untouched.
// An empty result is a valid table; callers decide how to present it.

fn filter_by<P>(table: &Table, predicate: P) -> Table
where
    P: Fn(&Record) -> bool,
{
    table.iter().filter(|r| predicate(r)).cloned().collect()
}

/// Records whose Year equals `year`.
pub fn filter_by_year(table: &Table, year: i32) -> Table {
    filter_by(table, |r| r.year.year() == year)
}

/// Records whose Year is a member of `years`.
pub fn filter_by_years(table: &Table, years: &BTreeSet<i32>) -> Table {
    filter_by(table, |r| years.contains(&r.year.year()))
}

/// Records for exactly one character.
pub fn filter_by_character(table: &Table, name: &str) -> Table {
    filter_by(table, |r| r.character == name)
}

/// Records whose Character Name is a member of `names`.
pub fn filter_by_characters(table: &Table, names: &BTreeSet<String>) -> Table {
    filter_by(table, |r| names.contains(&r.character))
}

// ---------------------------------------------------------------------------
// Combined filter
// ---------------------------------------------------------------------------

/// Year-set AND character-set selection.
///
/// An empty set in either dimension selects nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsightsFilter {
    pub years: BTreeSet<i32>,
    pub characters: BTreeSet<String>,
}

impl InsightsFilter {
    /// Year filter, then character filter.
    pub fn apply(&self, table: &Table) -> Table {
        let out = filter_by_characters(&filter_by_years(table, &self.years), &self.characters);
        log::debug!(
            "insights filter years={:?} characters={:?} -> {} rows",
            self.years,
            self.characters,
            out.len()
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, small_table};

    fn names(table: &Table) -> Vec<(&str, i32, u32)> {
        table
            .iter()
            .map(|r| (r.character.as_str(), r.year.year(), r.rank))
            .collect()
    }

    #[test]
    fn by_year_keeps_exact_matches_in_order() {
        let t = small_table();
        let out = filter_by_year(&t, 1990);
        assert_eq!(names(&out), vec![("HelloKitty", 1990, 1), ("Kuromi", 1990, 5)]);
    }

    #[test]
    fn by_year_is_idempotent() {
        let t = small_table();
        let once = filter_by_year(&t, 1990);
        let twice = filter_by_year(&once, 1990);
        assert_eq!(once, twice);
    }

    #[test]
    fn by_year_does_not_touch_source() {
        let t = small_table();
        let before = t.clone();
        let _ = filter_by_year(&t, 1991);
        assert_eq!(t, before);
    }

    #[test]
    fn by_year_without_match_is_empty() {
        assert!(filter_by_year(&small_table(), 2024).is_empty());
    }

    #[test]
    fn every_year_partition_covers_table() {
        let t = small_table();
        let total: usize = t.years().into_iter().map(|y| filter_by_year(&t, y).len()).sum();
        assert_eq!(total, t.len());
    }

    #[test]
    fn by_years_membership() {
        let t = Table::new(vec![
            record("A", 2000, 1, 1, 1, 1),
            record("B", 2001, 2, 2, 2, 1),
            record("C", 2002, 3, 3, 3, 1),
        ]);
        let years: BTreeSet<i32> = [2000, 2002].into_iter().collect();
        let out = filter_by_years(&t, &years);
        assert_eq!(names(&out), vec![("A", 2000, 1), ("C", 2002, 3)]);
    }

    #[test]
    fn by_characters_empty_set_is_empty_table() {
        let out = filter_by_characters(&small_table(), &BTreeSet::new());
        assert!(out.is_empty());
    }

    #[test]
    fn by_character_single() {
        let out = filter_by_character(&small_table(), "HelloKitty");
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.character == "HelloKitty"));
    }

    #[test]
    fn combined_filter_is_logical_and() {
        let filter = InsightsFilter {
            years: [1990].into_iter().collect(),
            characters: ["Kuromi".to_string()].into_iter().collect(),
        };
        let out = filter.apply(&small_table());
        assert_eq!(names(&out), vec![("Kuromi", 1990, 5)]);
    }

    #[test]
    fn combined_filter_with_empty_dimension_selects_nothing() {
        let filter = InsightsFilter {
            years: BTreeSet::new(),
            characters: ["Kuromi".to_string()].into_iter().collect(),
        };
        assert!(filter.apply(&small_table()).is_empty());
    }
}
