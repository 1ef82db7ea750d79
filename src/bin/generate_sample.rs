use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Characters ranked each year.
const RANKED_PER_YEAR: usize = 10;
const FIRST_YEAR: i64 = 2010;
const LAST_YEAR: i64 = 2024;

/// (name, debut year, base popularity)
const CHARACTERS: [(&str, i64, f64); 12] = [
    ("Hello Kitty", 1974, 92.0),
    ("My Melody", 1975, 84.0),
    ("Little Twin Stars", 1975, 70.0),
    ("Tuxedosam", 1979, 58.0),
    ("Hangyodon", 1985, 60.0),
    ("Keroppi", 1988, 62.0),
    ("Pochacco", 1989, 74.0),
    ("Bad Badtz-Maru", 1993, 66.0),
    ("Pompompurin", 1996, 86.0),
    ("Cinnamoroll", 2001, 95.0),
    ("Kuromi", 2005, 88.0),
    ("Aggretsuko", 2015, 55.0),
];

/// Deterministic popularity noise (splitmix64 underneath).
struct Noise(u64);

impl Noise {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Triangular noise in `[-spread, spread]`, centred on zero.
    fn jitter(&mut self, spread: f64) -> f64 {
        let unit = |n: u64| (n >> 11) as f64 / (1u64 << 53) as f64;
        let (a, b) = (unit(self.next_u64()), unit(self.next_u64()));
        (a + b - 1.0) * spread
    }
}

/// One ranked (character, year, rank) observation.
struct Placement {
    character: &'static str,
    debut: i64,
    year: i64,
    rank: i64,
}

fn simulate(noise: &mut Noise) -> Vec<Placement> {
    let mut placements = Vec::new();
    for year in FIRST_YEAR..=LAST_YEAR {
        let mut scores: Vec<(f64, &'static str, i64)> = CHARACTERS
            .iter()
            .filter(|(_, debut, _)| *debut <= year)
            .map(|&(name, debut, base)| {
                // Newer characters gain ground over the years.
                let trend = (year - FIRST_YEAR) as f64 * (debut - 1990) as f64 * 0.02;
                (base + trend + noise.jitter(8.0), name, debut)
            })
            .collect();
        scores.sort_by(|a, b| b.0.total_cmp(&a.0));

        for (i, (_, name, debut)) in scores.into_iter().take(RANKED_PER_YEAR).enumerate() {
            placements.push(Placement {
                character: name,
                debut,
                year,
                rank: i as i64 + 1,
            });
        }
    }
    placements
}

fn main() -> Result<()> {
    let mut noise = Noise(42);
    let placements = simulate(&mut noise);

    // Highest / lowest rank and times ranked per character.
    let mut stats: BTreeMap<&str, (i64, i64, i64)> = BTreeMap::new();
    for p in &placements {
        let entry = stats.entry(p.character).or_insert((i64::MAX, i64::MIN, 0));
        entry.0 = entry.0.min(p.rank);
        entry.1 = entry.1.max(p.rank);
        entry.2 += 1;
    }
    let stat = |name: &str| stats.get(name).copied().unwrap_or((0, 0, 0));

    // ---- CSV ----
    let csv_path = "cleaned_SanrioRank.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV file")?;
    writer.write_record([
        "Character Name",
        "Year",
        "Rank",
        "Highest Rank",
        "Lowest Rank",
        "Total Times Ranked",
        "Debut",
    ])?;
    for p in &placements {
        let (highest, lowest, total) = stat(p.character);
        writer.write_record([
            p.character.to_string(),
            p.year.to_string(),
            p.rank.to_string(),
            highest.to_string(),
            lowest.to_string(),
            total.to_string(),
            p.debut.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;

    // ---- Parquet ----
    let schema = Arc::new(Schema::new(vec![
        Field::new("Character Name", DataType::Utf8, false),
        Field::new("Year", DataType::Int64, false),
        Field::new("Rank", DataType::Int64, false),
        Field::new("Highest Rank", DataType::Int64, false),
        Field::new("Lowest Rank", DataType::Int64, false),
        Field::new("Total Times Ranked", DataType::Int64, false),
        Field::new("Debut", DataType::Int64, false),
    ]));

    let column = |f: fn(&Placement) -> i64| Int64Array::from(placements.iter().map(f).collect::<Vec<_>>());
    let per_character = |pick: fn((i64, i64, i64)) -> i64| {
        Int64Array::from(
            placements
                .iter()
                .map(|p| pick(stat(p.character)))
                .collect::<Vec<_>>(),
        )
    };

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                placements.iter().map(|p| p.character).collect::<Vec<_>>(),
            )),
            Arc::new(column(|p| p.year)),
            Arc::new(column(|p| p.rank)),
            Arc::new(per_character(|s| s.0)),
            Arc::new(per_character(|s| s.1)),
            Arc::new(per_character(|s| s.2)),
            Arc::new(column(|p| p.debut)),
        ],
    )
    .context("building record batch")?;

    let parquet_path = "cleaned_SanrioRank.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    println!(
        "Wrote {} placements for {} characters ({FIRST_YEAR}-{LAST_YEAR}) to {csv_path} and {parquet_path}",
        placements.len(),
        stats.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_stays_within_spread() {
        let mut noise = Noise(7);
        for _ in 0..1000 {
            let v = noise.jitter(8.0);
            assert!((-8.0..=8.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn each_year_ranks_one_through_ten() {
        let placements = simulate(&mut Noise(42));
        for year in FIRST_YEAR..=LAST_YEAR {
            let ranks: Vec<i64> = placements
                .iter()
                .filter(|p| p.year == year)
                .map(|p| p.rank)
                .collect();
            assert_eq!(ranks, (1..=RANKED_PER_YEAR as i64).collect::<Vec<_>>());
        }
        assert!(placements.iter().all(|p| p.debut <= p.year));
    }

    #[test]
    fn same_seed_same_placements() {
        let a: Vec<(&str, i64)> = simulate(&mut Noise(42))
            .into_iter()
            .map(|p| (p.character, p.rank))
            .collect();
        let b: Vec<(&str, i64)> = simulate(&mut Noise(42))
            .into_iter()
            .map(|p| (p.character, p.rank))
            .collect();
        assert_eq!(a, b);
    }
}
