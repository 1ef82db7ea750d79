use std::path::Path;

use anyhow::{Context, Result};

use super::model::Table;

pub const CSV_MIME: &str = "text/csv";

/// A downloadable file produced from a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Write the artifact's bytes to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!(
            "Exported {} ({}, {} bytes) to {}",
            self.file_name,
            self.mime,
            self.bytes.len(),
            path.display()
        );
        Ok(())
    }
}

/// Encode a table as CSV: header row, no index column, years as four digits.
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if table.is_empty() {
        writer
            .write_record(super::model::REQUIRED_COLUMNS)
            .context("writing CSV header")?;
    }
    for record in table {
        writer.serialize(record).context("writing CSV record")?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV buffer: {}", e.error()))
}

/// Encode `table` into a CSV artifact named `file_name`.
pub fn csv_artifact(table: &Table, file_name: &str) -> Result<ExportArtifact> {
    Ok(ExportArtifact {
        file_name: file_name.to_string(),
        mime: CSV_MIME,
        bytes: to_csv_bytes(table)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::filter_by_year;
    use crate::data::loader::load_csv_reader;
    use crate::data::model::fixtures::small_table;

    #[test]
    fn header_and_rows() {
        let bytes = to_csv_bytes(&small_table()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Character Name,Year,Rank,Highest Rank,Lowest Rank,Total Times Ranked,Debut")
        );
        assert_eq!(lines.next(), Some("HelloKitty,1990,1,1,5,10,1974"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn filtered_table_round_trips() {
        let filtered = filter_by_year(&small_table(), 1990);
        let bytes = to_csv_bytes(&filtered).unwrap();
        let reloaded = load_csv_reader(bytes.as_slice()).unwrap();
        assert_eq!(reloaded, filtered);
    }

    #[test]
    fn empty_table_keeps_header() {
        let bytes = to_csv_bytes(&Table::default()).unwrap();
        let reloaded = load_csv_reader(bytes.as_slice()).unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn artifact_metadata_and_save() {
        let artifact = csv_artifact(&small_table(), "filtered_sanrio_data.csv").unwrap();
        assert_eq!(artifact.mime, "text/csv");
        assert_eq!(artifact.file_name, "filtered_sanrio_data.csv");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(&artifact.file_name);
        artifact.save(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes);
    }
}
