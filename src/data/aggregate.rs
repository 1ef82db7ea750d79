use std::collections::{BTreeMap, HashMap, HashSet};

use super::model::{Record, Table};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Scalar summaries
// ---------------------------------------------------------------------------

/// Number of distinct character names.
pub fn distinct_character_count(table: &Table) -> usize {
    table
        .iter()
        .map(|r| r.character.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Occurrences per character among records matching `predicate`, sorted by
/// count descending, ties broken by name ascending.
fn frequency_by_character<P>(table: &Table, predicate: P) -> Vec<(String, usize)>
where
    P: Fn(&Record) -> bool,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in table.iter().filter(|r| predicate(r)) {
        *counts.entry(r.character.as_str()).or_default() += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, n)| (name.to_string(), n))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// The character that holds Rank 1 most often.
///
/// Fails with [`DataError::NoTopRank`] when no record has Rank 1.
pub fn most_frequent_top_rank(table: &Table) -> Result<String, DataError> {
    frequency_by_character(table, |r| r.rank == 1)
        .into_iter()
        .next()
        .map(|(name, _)| name)
        .ok_or(DataError::NoTopRank)
}

/// Up to `n` characters with the most finishes at or above `max_rank`.
pub fn top_frequency(table: &Table, max_rank: u32, n: usize) -> Vec<(String, usize)> {
    let mut ranked = frequency_by_character(table, |r| r.rank <= max_rank);
    ranked.truncate(n);
    ranked
}

/// The three characters with the most top-3 finishes.
pub fn top_three_frequency(table: &Table) -> Vec<(String, usize)> {
    top_frequency(table, 3, 3)
}

// ---------------------------------------------------------------------------
// Per-character extremes
// ---------------------------------------------------------------------------

/// Best / worst rank and ranking count for one character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterExtremes {
    /// Minimum of Highest Rank (`None` without records).
    pub highest_rank: Option<u32>,
    /// Maximum of Lowest Rank (`None` without records).
    pub lowest_rank: Option<u32>,
    /// Sum of Total Times Ranked.
    pub total_times_ranked: u64,
}

pub fn per_character_extremes(table: &Table, character: &str) -> CharacterExtremes {
    table
        .iter()
        .filter(|r| r.character == character)
        .fold(CharacterExtremes::default(), |acc, r| CharacterExtremes {
            highest_rank: Some(acc.highest_rank.map_or(r.highest_rank, |v| v.min(r.highest_rank))),
            lowest_rank: Some(acc.lowest_rank.map_or(r.lowest_rank, |v| v.max(r.lowest_rank))),
            total_times_ranked: acc.total_times_ranked + u64::from(r.total_times_ranked),
        })
}

// ---------------------------------------------------------------------------
// Group-by and pivot
// ---------------------------------------------------------------------------

/// Sum of Total Times Ranked for each character, ordered by name.
pub fn total_ranked_by_character(table: &Table) -> Vec<(String, u64)> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for r in table {
        *totals.entry(r.character.as_str()).or_default() += u64::from(r.total_times_ranked);
    }
    totals
        .into_iter()
        .map(|(name, total)| (name.to_string(), total))
        .collect()
}

/// Character × year matrix of ranks.
///
/// A cell is the mean Rank of that character's records for the year, or
/// `None` when the character was not ranked that year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankPivot {
    /// Row keys, ascending.
    pub characters: Vec<String>,
    /// Column keys, ascending.
    pub years: Vec<i32>,
    /// `cells[row][col]`.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl RankPivot {
    pub fn get(&self, character: &str, year: i32) -> Option<f64> {
        let row = self.characters.iter().position(|c| c == character)?;
        let col = self.years.iter().position(|y| *y == year)?;
        self.cells[row][col]
    }

    /// Smallest and largest defined cell value.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

pub fn rank_pivot(table: &Table) -> RankPivot {
    let characters: Vec<String> = table.characters();
    let years: Vec<i32> = table.years();

    let mut sums: HashMap<(&str, i32), (u64, u32)> = HashMap::new();
    for r in table {
        let slot = sums.entry((r.character.as_str(), r.year.year())).or_default();
        slot.0 += u64::from(r.rank);
        slot.1 += 1;
    }

    let cells = characters
        .iter()
        .map(|c| {
            years
                .iter()
                .map(|y| {
                    sums.get(&(c.as_str(), *y))
                        .map(|(sum, n)| *sum as f64 / f64::from(*n))
                })
                .collect()
        })
        .collect();

    RankPivot {
        characters,
        years,
        cells,
    }
}

// ---------------------------------------------------------------------------
// Ordering and binning
// ---------------------------------------------------------------------------

/// The `n` best-ranked records; equal ranks keep table order.
pub fn top_n_by_rank(table: &Table, n: usize) -> Table {
    let mut rows: Vec<Record> = table.records().to_vec();
    rows.sort_by_key(|r| r.rank);
    rows.truncate(n);
    Table::new(rows)
}

/// One histogram bucket, `[start, end)` except the last which is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width histogram of Debut years over the observed range.
pub fn debut_histogram(table: &Table, bins: usize) -> Vec<HistogramBin> {
    let debuts: Vec<f64> = table.iter().map(|r| f64::from(r.debut.year())).collect();
    histogram(&debuts, bins)
}

fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let (lo, hi) = if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: lo + i as f64 * width,
            end: lo + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();
    for v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}
