//! CSV artifact writing

use std::fs;
use std::path::{Path, PathBuf};

use jobscout_common::Result;
use tracing::info;

use crate::merge::ConsolidatedTable;

/// What was written, for the end-of-run report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub bytes: u64,
}

/// Write the consolidated table to `path`, overwriting any prior artifact.
///
/// The header row follows the table's projected column order. Required
/// fields are always present after schema enforcement; an extra column a
/// given record does not carry serializes as the empty string. Callers are
/// expected to skip the write entirely for an empty table.
pub fn write_csv(table: &ConsolidatedTable, path: &Path) -> Result<ArtifactSummary> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(table.columns())?;
    for record in table.records() {
        let row: Vec<&str> = table
            .columns()
            .iter()
            .map(|column| record.get(column).unwrap_or(""))
            .collect();
        writer.write_record(row)?;
    }
    writer.flush()?;

    let bytes = fs::metadata(path)?.len();
    let summary = ArtifactSummary {
        path: path.to_path_buf(),
        rows: table.row_count(),
        bytes,
    };

    info!(
        path = %summary.path.display(),
        rows = summary.rows,
        bytes = summary.bytes,
        "artifact written"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::ProducerResult;
    use crate::merge::consolidate;
    use jobscout_common::types::JobRecord;

    fn sample_table() -> ConsolidatedTable {
        let records = vec![
            JobRecord::new()
                .with("source", "Jora")
                .with("title", "Engineer")
                .with("company", "Acme"),
            JobRecord::new()
                .with("source", "Seek")
                .with("title", "Analyst")
                .with("posted", "today"),
        ];
        consolidate(vec![ProducerResult {
            label: "test".to_string(),
            records,
        }])
    }

    #[test]
    fn writes_header_and_all_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("jobs.csv");

        let table = sample_table();
        let summary = write_csv(&table, &path).expect("write should succeed");

        assert_eq!(summary.rows, 2);
        assert!(summary.bytes > 0);

        let contents = fs::read_to_string(&path).expect("read back");
        let mut lines = contents.lines();
        let header = lines.next().expect("header line");
        assert!(header.starts_with("source,"));
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn missing_extra_fields_serialize_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("jobs.csv");

        let table = sample_table();
        write_csv(&table, &path).expect("write should succeed");

        let contents = fs::read_to_string(&path).expect("read back");
        let mut reader = csv::Reader::from_reader(contents.as_bytes());
        let headers = reader.headers().expect("headers").clone();
        let posted_idx = headers
            .iter()
            .position(|h| h == "posted")
            .expect("posted column");

        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<std::result::Result<_, _>>().expect("rows");
        // First record (Jora) never carried "posted"
        assert_eq!(&rows[0][posted_idx], "");
        assert_eq!(&rows[1][posted_idx], "today");
    }

    #[test]
    fn overwrites_prior_artifact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("jobs.csv");
        fs::write(&path, "stale contents from a previous run").expect("seed file");

        let table = sample_table();
        write_csv(&table, &path).expect("write should succeed");

        let contents = fs::read_to_string(&path).expect("read back");
        assert!(!contents.contains("stale contents"));
        assert!(contents.starts_with("source,"));
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let table = sample_table();
        let result = write_csv(&table, Path::new("/nonexistent-dir/jobs.csv"));
        assert!(result.is_err());
    }
}
