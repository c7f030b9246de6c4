//! Producer contract implemented by portal collectors

use async_trait::async_trait;
use jobscout_common::types::JobRecord;

/// A single data-collection capability: fetch up to `max_pages` pages of
/// listings, or fail.
///
/// Implementations must not share mutable state; the dispatcher invokes
/// producers concurrently and relies on each one writing only to its own
/// return value. Any error escapes no further than the dispatcher's
/// isolation wrapper, so implementations are free to bail with whatever
/// error detail is useful in diagnostics.
#[async_trait]
pub trait Producer: Send + Sync {
    /// Collect up to `max_pages` pages of job records.
    async fn produce(&self, max_pages: u32) -> anyhow::Result<Vec<JobRecord>>;
}
