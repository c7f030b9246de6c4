//! Merging and schema normalization of collected results
//!
//! A stateless fold over the dispatcher's result list: flatten, enforce the
//! required-field schema on every record, then project the column order
//! with `source` pinned first.

use std::collections::BTreeMap;

use indexmap::IndexSet;
use jobscout_common::types::{JobRecord, MISSING_VALUE, REQUIRED_FIELDS, SOURCE_FIELD};

use crate::dispatch::ProducerResult;

/// The union of all producer results under a uniform schema.
///
/// Row order is producer completion order, then within-producer order.
/// Completion order is scheduler-dependent, an accepted nondeterminism;
/// nothing downstream relies on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidatedTable {
    columns: Vec<String>,
    records: Vec<JobRecord>,
}

impl ConsolidatedTable {
    /// Projected column names, `source` first
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All records, schema-enforced
    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record count per `source` value, computed over the final table
    pub fn source_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            let source = record.get(SOURCE_FIELD).unwrap_or(MISSING_VALUE);
            *counts.entry(source.to_string()).or_insert(0) += 1;
        }
        counts
    }
}

/// Flatten all producer results into one consolidated table.
pub fn consolidate(results: Vec<ProducerResult>) -> ConsolidatedTable {
    let records: Vec<JobRecord> = results
        .into_iter()
        .flat_map(|result| result.records)
        .map(enforce_schema)
        .collect();

    let columns = project_columns(&records);

    ConsolidatedTable { columns, records }
}

/// Fill every missing required field with the `"N/A"` sentinel.
///
/// Extra fields the portal attached are preserved untouched; only absent
/// required fields are inserted, at the end of the record.
pub fn enforce_schema(mut record: JobRecord) -> JobRecord {
    for field in REQUIRED_FIELDS {
        if !record.contains(field) {
            record.set(field, MISSING_VALUE);
        }
    }
    record
}

/// Column order for the artifact: `source` first, then every other field in
/// first-occurrence order across the records.
fn project_columns(records: &[JobRecord]) -> Vec<String> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut seen: IndexSet<&str> = IndexSet::new();
    for record in records {
        for field in record.field_names() {
            seen.insert(field);
        }
    }

    let mut columns = Vec::with_capacity(seen.len());
    columns.push(SOURCE_FIELD.to_string());
    columns.extend(
        seen.into_iter()
            .filter(|field| *field != SOURCE_FIELD)
            .map(String::from),
    );
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_of(label: &str, records: Vec<JobRecord>) -> ProducerResult {
        ProducerResult {
            label: label.to_string(),
            records,
        }
    }

    fn full_record(source: &str, title: &str) -> JobRecord {
        JobRecord::new()
            .with("title", title)
            .with("company", "Acme Pty Ltd")
            .with("location", "Sydney NSW")
            .with("salary", "$120k")
            .with("description", "Build things")
            .with("job_url", "https://example.com/job/1")
            .with("source", source)
    }

    #[test]
    fn union_count_matches_sum_of_inputs() {
        let jora: Vec<JobRecord> = (0..3).map(|i| full_record("Jora", &format!("a{i}"))).collect();
        let seek: Vec<JobRecord> = (0..2).map(|i| full_record("Seek", &format!("b{i}"))).collect();

        let table = consolidate(vec![result_of("Jora", jora), result_of("Seek", seek)]);

        assert_eq!(table.row_count(), 5);
    }

    #[test]
    fn missing_required_fields_are_filled_with_sentinel() {
        // Jora records missing salary, Seek records complete
        let jora: Vec<JobRecord> = (0..3)
            .map(|i| {
                JobRecord::new()
                    .with("title", format!("job {i}"))
                    .with("company", "Acme")
                    .with("location", "Melbourne VIC")
                    .with("description", "...")
                    .with("job_url", "https://example.com")
                    .with("source", "Jora")
            })
            .collect();
        let seek: Vec<JobRecord> = (0..2).map(|i| full_record("Seek", &format!("s{i}"))).collect();

        let table = consolidate(vec![result_of("Jora", jora), result_of("Seek", seek)]);

        assert_eq!(table.row_count(), 5);
        for record in table.records() {
            for field in REQUIRED_FIELDS {
                assert!(record.contains(field), "missing required field {field}");
            }
        }
        let na_salaries = table
            .records()
            .iter()
            .filter(|r| r.get("salary") == Some(MISSING_VALUE))
            .count();
        assert_eq!(na_salaries, 3);

        let counts = table.source_counts();
        assert_eq!(counts.get("Jora"), Some(&3));
        assert_eq!(counts.get("Seek"), Some(&2));
    }

    #[test]
    fn source_is_always_first_column() {
        // Records deliberately put source last / in the middle
        let records = vec![
            JobRecord::new()
                .with("title", "one")
                .with("source", "Jora"),
            JobRecord::new()
                .with("source", "Jora")
                .with("title", "two"),
        ];

        let table = consolidate(vec![result_of("Jora", records)]);

        assert_eq!(table.columns()[0], SOURCE_FIELD);
    }

    #[test]
    fn extra_fields_are_preserved_in_first_occurrence_order() {
        let first = full_record("Jora", "one").with("posted", "today");
        let second = full_record("Seek", "two")
            .with("work_type", "Full time")
            .with("posted", "yesterday");

        let table = consolidate(vec![
            result_of("Jora", vec![first]),
            result_of("Seek", vec![second]),
        ]);

        let columns = table.columns();
        assert_eq!(columns[0], "source");
        let posted_idx = columns.iter().position(|c| c == "posted");
        let work_type_idx = columns.iter().position(|c| c == "work_type");
        assert!(posted_idx.is_some());
        assert!(work_type_idx.is_some());
        // "posted" was first seen before "work_type"
        assert!(posted_idx < work_type_idx);

        // Extra fields survived enforcement
        assert_eq!(table.records()[0].get("posted"), Some("today"));
        assert_eq!(table.records()[1].get("work_type"), Some("Full time"));
    }

    #[test]
    fn source_counts_agree_with_row_count() {
        let jora: Vec<JobRecord> = (0..4).map(|i| full_record("Jora", &format!("a{i}"))).collect();
        let seek: Vec<JobRecord> = (0..3).map(|i| full_record("Seek", &format!("b{i}"))).collect();

        let table = consolidate(vec![result_of("Jora", jora), result_of("Seek", seek)]);

        let total: usize = table.source_counts().values().sum();
        assert_eq!(total, table.row_count());
    }

    #[test]
    fn record_without_source_counts_under_sentinel() {
        let orphan = JobRecord::new().with("title", "mystery job");

        let table = consolidate(vec![result_of("Jora", vec![orphan])]);

        // Enforcement fills source with the sentinel, and the summary
        // reflects the final table rather than the producing task.
        assert_eq!(table.source_counts().get(MISSING_VALUE), Some(&1));
    }

    #[test]
    fn empty_results_yield_empty_table() {
        let table = consolidate(vec![
            ProducerResult::empty("Jora"),
            ProducerResult::empty("Seek"),
        ]);

        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert!(table.columns().is_empty());
        assert!(table.source_counts().is_empty());
    }

    #[test]
    fn enforce_schema_is_a_pure_fill() {
        let sparse = JobRecord::new().with("title", "only title");
        let enforced = enforce_schema(sparse);

        assert_eq!(enforced.get("title"), Some("only title"));
        for field in REQUIRED_FIELDS {
            assert!(enforced.contains(field));
        }
        // Already-present fields are not overwritten
        assert_ne!(enforced.get("title"), Some(MISSING_VALUE));
    }
}
