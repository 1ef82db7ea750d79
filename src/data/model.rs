use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const COL_CHARACTER: &str = "Character Name";
pub const COL_YEAR: &str = "Year";
pub const COL_RANK: &str = "Rank";
pub const COL_HIGHEST_RANK: &str = "Highest Rank";
pub const COL_LOWEST_RANK: &str = "Lowest Rank";
pub const COL_TOTAL_TIMES_RANKED: &str = "Total Times Ranked";
pub const COL_DEBUT: &str = "Debut";

/// Every column the loader insists on, in export order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_CHARACTER,
    COL_YEAR,
    COL_RANK,
    COL_HIGHEST_RANK,
    COL_LOWEST_RANK,
    COL_TOTAL_TIMES_RANKED,
    COL_DEBUT,
];

// ---------------------------------------------------------------------------
// Year – a year-precision date
// ---------------------------------------------------------------------------

/// A calendar year stored as January 1 of that year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(NaiveDate);

impl Year {
    /// Parse a four-digit year such as `"1974"`.
    ///
    /// Anything else (signs, whitespace, two-digit years, full dates) is
    /// rejected.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<i32>().ok().and_then(Self::from_year)
    }

    /// Build from a numeric year in `1000..=9999`.
    pub fn from_year(year: i32) -> Option<Self> {
        if !(1000..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, 1, 1).map(Year)
    }

    /// The year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.year())
    }
}

impl Serialize for Year {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Record – one character-year ranking observation
// ---------------------------------------------------------------------------

/// One row of the ranking table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(rename = "Character Name")]
    pub character: String,
    #[serde(rename = "Year")]
    pub year: Year,
    #[serde(rename = "Rank")]
    pub rank: u32,
    #[serde(rename = "Highest Rank")]
    pub highest_rank: u32,
    #[serde(rename = "Lowest Rank")]
    pub lowest_rank: u32,
    #[serde(rename = "Total Times Ranked")]
    pub total_times_ranked: u32,
    #[serde(rename = "Debut")]
    pub debut: Year,
}

// ---------------------------------------------------------------------------
// Table – ordered, immutable collection of records
// ---------------------------------------------------------------------------

/// An ordered sequence of records.
///
/// Tables are never mutated after construction; filters and aggregations
/// produce new values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    records: Vec<Record>,
}

/// Shared read-only handle to the loaded dataset.
pub type DatasetHandle = Arc<Table>;

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Table { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct year components, ascending.
    pub fn years(&self) -> Vec<i32> {
        let set: BTreeSet<i32> = self.records.iter().map(|r| r.year.year()).collect();
        set.into_iter().collect()
    }

    /// Distinct character names, ascending.
    pub fn characters(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| r.character.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Distinct year components in order of first appearance.
    pub fn years_in_order(&self) -> Vec<i32> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.year.year())
            .filter(|y| seen.insert(*y))
            .collect()
    }

    /// The first `n` records.
    pub fn head(&self, n: usize) -> Table {
        Table::new(self.records.iter().take(n).cloned().collect())
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Table::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(
        character: &str,
        year: i32,
        rank: u32,
        highest: u32,
        lowest: u32,
        total: u32,
    ) -> Record {
        Record {
            character: character.to_string(),
            year: Year::from_year(year).unwrap(),
            rank,
            highest_rank: highest,
            lowest_rank: lowest,
            total_times_ranked: total,
            debut: Year::from_year(1974).unwrap(),
        }
    }

    /// The three-row table used throughout the docs.
    pub fn small_table() -> Table {
        Table::new(vec![
            record("HelloKitty", 1990, 1, 1, 5, 10),
            record("HelloKitty", 1991, 2, 1, 5, 10),
            record("Kuromi", 1990, 5, 3, 8, 4),
        ])
    }
}
