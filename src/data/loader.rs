use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Int16Type, Int32Type, Int64Type, UInt16Type, UInt32Type, UInt64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    Record, Table, Year, COL_CHARACTER, COL_DEBUT, COL_HIGHEST_RANK, COL_LOWEST_RANK, COL_RANK,
    COL_TOTAL_TIMES_RANKED, COL_YEAR, REQUIRED_COLUMNS,
};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a ranking table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the seven ranking columns (recommended)
/// * `.json`    – `[{ "Character Name": "...", "Year": "1990", ... }, ...]`
/// * `.parquet` – one column per field; years as integers or strings
///
/// Malformed cells and missing columns surface as [`DataError`] inside the
/// returned error chain.
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedFormat(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    let years = table.years();
    log::info!(
        "Loaded {} records ({} characters, years {}..={}) from {}",
        table.len(),
        table.characters().len(),
        years.first().copied().unwrap_or_default(),
        years.last().copied().unwrap_or_default(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Row parsing shared by every format
// ---------------------------------------------------------------------------

/// Textual form of one cell as read from the source format.
enum Cell {
    Text(String),
    /// Null or absent.
    Missing,
    /// A value whose type cannot hold a year or count; carries the type name.
    Unsupported(String),
}

/// Build one [`Record`] from a row, given a lookup returning each cell.
fn parse_row<F>(row: usize, cell: F) -> std::result::Result<Record, DataError>
where
    F: Fn(&'static str) -> Cell,
{
    let text = |column: &'static str| -> std::result::Result<String, DataError> {
        match cell(column) {
            Cell::Text(s) => Ok(s),
            Cell::Missing => Err(DataError::Parse {
                row,
                column,
                value: String::new(),
                reason: "missing value",
            }),
            Cell::Unsupported(type_name) => Err(DataError::Parse {
                row,
                column,
                value: type_name,
                reason: "unsupported column type",
            }),
        }
    };

    let character = text(COL_CHARACTER)?;
    if character.is_empty() {
        return Err(DataError::Parse {
            row,
            column: COL_CHARACTER,
            value: character,
            reason: "empty name",
        });
    }

    Ok(Record {
        character,
        year: parse_year(row, COL_YEAR, &text(COL_YEAR)?)?,
        rank: parse_count(row, COL_RANK, &text(COL_RANK)?, 1)?,
        highest_rank: parse_count(row, COL_HIGHEST_RANK, &text(COL_HIGHEST_RANK)?, 1)?,
        lowest_rank: parse_count(row, COL_LOWEST_RANK, &text(COL_LOWEST_RANK)?, 1)?,
        total_times_ranked: parse_count(
            row,
            COL_TOTAL_TIMES_RANKED,
            &text(COL_TOTAL_TIMES_RANKED)?,
            0,
        )?,
        debut: parse_year(row, COL_DEBUT, &text(COL_DEBUT)?)?,
    })
}

fn parse_year(row: usize, column: &'static str, s: &str) -> std::result::Result<Year, DataError> {
    Year::parse(s).ok_or_else(|| DataError::Parse {
        row,
        column,
        value: s.to_string(),
        reason: "expected a four-digit year",
    })
}

fn parse_count(
    row: usize,
    column: &'static str,
    s: &str,
    min: u32,
) -> std::result::Result<u32, DataError> {
    let value = s.parse::<u32>().map_err(|_| DataError::Parse {
        row,
        column,
        value: s.to_string(),
        reason: "expected a non-negative integer",
    })?;
    if value < min {
        return Err(DataError::Parse {
            row,
            column,
            value: s.to_string(),
            reason: "rank must be at least 1",
        });
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    load_csv_reader(file)
}

/// Parse a CSV table from any reader.
///
/// Column order is free and extra columns are ignored; each of the seven
/// ranking columns must be present in the header.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Table> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut positions = Vec::with_capacity(REQUIRED_COLUMNS.len());
    for column in REQUIRED_COLUMNS {
        let idx = headers
            .iter()
            .position(|h| h == column)
            .ok_or(DataError::MissingColumn(column))?;
        positions.push((column, idx));
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let record = parse_row(row_no, |column| {
            positions
                .iter()
                .find(|(c, _)| *c == column)
                .and_then(|(_, idx)| row.get(*idx))
                .map_or(Cell::Missing, |s| Cell::Text(s.to_string()))
        })?;
        records.push(record);
    }

    Ok(Table::new(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Character Name": "Hello Kitty",
///     "Year": "1990",
///     "Rank": 1,
///     "Highest Rank": 1,
///     "Lowest Rank": 5,
///     "Total Times Ranked": 10,
///     "Debut": 1974
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Table> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, rec) in rows.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        if i == 0 {
            for column in REQUIRED_COLUMNS {
                if !obj.contains_key(column) {
                    return Err(DataError::MissingColumn(column).into());
                }
            }
        }
        records.push(parse_row(i, |column| {
            obj.get(column).map_or(Cell::Missing, json_cell_text)
        })?);
    }

    Ok(Table::new(records))
}

fn json_cell_text(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => Cell::Text(n.to_string()),
        JsonValue::Null => Cell::Missing,
        JsonValue::Bool(_) => Cell::Unsupported("boolean".to_string()),
        JsonValue::Array(_) => Cell::Unsupported("array".to_string()),
        JsonValue::Object(_) => Cell::Unsupported("object".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// String columns may be Utf8 or LargeUtf8; numeric columns any signed or
/// unsigned integer width. Year and Debut may be integers or four-digit
/// strings.
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut columns: Vec<(&'static str, Arc<dyn Array>)> = Vec::new();
        for column in REQUIRED_COLUMNS {
            let idx = schema
                .index_of(column)
                .map_err(|_| DataError::MissingColumn(column))?;
            columns.push((column, batch.column(idx).clone()));
        }

        let offset = records.len();
        for row in 0..batch.num_rows() {
            let record = parse_row(offset + row, |column| {
                columns
                    .iter()
                    .find(|(c, _)| *c == column)
                    .map_or(Cell::Missing, |(_, array)| arrow_cell_text(array, row))
            })?;
            records.push(record);
        }
    }

    Ok(Table::new(records))
}

/// Textual form of a single Arrow cell.
///
/// Floats and timestamps are not coerced; they surface as
/// [`Cell::Unsupported`] with the Arrow type name.
fn arrow_cell_text(col: &Arc<dyn Array>, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Missing;
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int16 => col.as_primitive::<Int16Type>().value(row).to_string(),
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row).to_string(),
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row).to_string(),
        DataType::UInt16 => col.as_primitive::<UInt16Type>().value(row).to_string(),
        DataType::UInt32 => col.as_primitive::<UInt32Type>().value(row).to_string(),
        DataType::UInt64 => col.as_primitive::<UInt64Type>().value(row).to_string(),
        other => return Cell::Unsupported(format!("{other:?}")),
    };
    Cell::Text(text)
}
