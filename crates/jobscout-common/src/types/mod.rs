//! Core record types shared across jobscout crates

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Fields every record in the consolidated output must carry.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "title",
    "company",
    "location",
    "salary",
    "description",
    "job_url",
    "source",
];

/// Column pinned first in the consolidated output.
pub const SOURCE_FIELD: &str = "source";

/// Sentinel written for required fields a portal did not supply.
pub const MISSING_VALUE: &str = "N/A";

/// One job listing, as a field-name to value mapping.
///
/// Uses `IndexMap` to preserve insertion order, which drives the
/// first-occurrence column ordering of the consolidated output. Portals may
/// attach extra fields beyond [`REQUIRED_FIELDS`]; they are carried through
/// to the artifact untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobRecord {
    fields: IndexMap<String, String>,
}

impl JobRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, preserving first-insertion position on overwrite
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Builder-style variant of [`set`](Self::set)
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Get a field value
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Whether the record carries the given field
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Field names in insertion order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
