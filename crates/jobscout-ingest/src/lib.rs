//! Jobscout Ingest Library
//!
//! Concurrent collection of job listings from multiple portals, merged into
//! one consolidated CSV artifact.
//!
//! # Supported Portals
//!
//! - **Jora**: aggregated job listings (au.jora.com)
//! - **Seek**: Australia's largest job board (seek.com.au)
//!
//! # Pipeline
//!
//! The run is a strict three-phase pipeline: all portal collectors are
//! dispatched concurrently and settle independently, their results are
//! merged under a uniform schema, then a single CSV artifact is written.
//! A collector failure never aborts its siblings; it degrades to an empty
//! result for that portal.
//!
//! # Example
//!
//! ```no_run
//! use jobscout_ingest::dispatch::{dispatch_all, ProducerTask};
//! use jobscout_ingest::merge::consolidate;
//! use jobscout_ingest::portals::JoraCrawler;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let jora = Arc::new(JoraCrawler::new("visa sponsorship", "Australia"));
//!     let tasks = vec![ProducerTask::new("Jora", jora, 1, Duration::from_secs(300))];
//!     let results = dispatch_all(tasks).await;
//!     let table = consolidate(results);
//!     println!("collected {} listings", table.row_count());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatch;
pub mod export;
pub mod merge;
pub mod portals;
pub mod producer;
pub mod progress;
