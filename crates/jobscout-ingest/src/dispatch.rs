//! Concurrent dispatcher for portal collection tasks
//!
//! Runs every configured producer invocation in parallel and guarantees
//! that a failure, timeout, or panic in one invocation never prevents
//! collection of the others' results. The orchestrating flow blocks at a
//! single join barrier until all tasks have settled; no result is consumed
//! before that point.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use jobscout_common::types::JobRecord;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::producer::Producer;

/// One scheduled producer invocation.
pub struct ProducerTask {
    /// Human-readable source label used in diagnostics ("Jora", "Seek").
    pub label: String,
    /// The collector to invoke.
    pub producer: Arc<dyn Producer>,
    /// Page limit handed to the producer.
    pub max_pages: u32,
    /// Deadline for the whole invocation; expiry counts as a failure.
    pub timeout: Duration,
}

impl ProducerTask {
    pub fn new(
        label: impl Into<String>,
        producer: Arc<dyn Producer>,
        max_pages: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            label: label.into(),
            producer,
            max_pages,
            timeout,
        }
    }
}

/// The settled outcome of one producer invocation. A failed, timed-out, or
/// panicked producer yields an empty record list rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProducerResult {
    pub label: String,
    pub records: Vec<JobRecord>,
}

impl ProducerResult {
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            records: Vec::new(),
        }
    }
}

/// Run a single producer invocation under its deadline.
///
/// Never returns an error: producer failures and deadline expiries are
/// logged with the task label and degrade to an empty result.
pub async fn run_one(task: ProducerTask) -> ProducerResult {
    let ProducerTask {
        label,
        producer,
        max_pages,
        timeout: deadline,
    } = task;

    info!(task = %label, max_pages, "starting collection");

    let records = match timeout(deadline, producer.produce(max_pages)).await {
        Ok(Ok(records)) => {
            info!(task = %label, records = records.len(), "collection completed");
            records
        },
        Ok(Err(e)) => {
            warn!(task = %label, error = %e, "collection failed, continuing without it");
            Vec::new()
        },
        Err(_) => {
            warn!(
                task = %label,
                timeout_secs = deadline.as_secs(),
                "collection timed out, continuing without it"
            );
            Vec::new()
        },
    };

    ProducerResult { label, records }
}

/// Dispatch all producer tasks concurrently and wait for every one of them
/// to settle.
///
/// Results are returned in completion order, which is scheduler-dependent
/// and carries no semantic meaning downstream. Each settled task occupies
/// exactly one slot in the returned list; a panicked task contributes an
/// empty result for its label.
pub async fn dispatch_all(tasks: Vec<ProducerTask>) -> Vec<ProducerResult> {
    let mut set = JoinSet::new();
    let mut labels: HashMap<tokio::task::Id, String> = HashMap::new();

    for task in tasks {
        let label = task.label.clone();
        let handle = set.spawn(run_one(task));
        labels.insert(handle.id(), label);
    }

    let mut results = Vec::with_capacity(labels.len());
    while let Some(joined) = set.join_next_with_id().await {
        match joined {
            Ok((_id, result)) => results.push(result),
            Err(join_err) => {
                let label = labels
                    .get(&join_err.id())
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                error!(task = %label, error = %join_err, "collection task aborted");
                results.push(ProducerResult::empty(label));
            },
        }
    }

    results
}
