//! Jobscout Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the jobscout workspace.
//!
//! # Overview
//!
//! This crate provides functionality used across all jobscout workspace
//! members:
//!
//! - **Error Handling**: the workspace error type and result alias
//! - **Logging**: tracing configuration and initialization
//! - **Types**: the job record model and required-field schema
//!
//! # Example
//!
//! ```
//! use jobscout_common::types::JobRecord;
//!
//! let mut record = JobRecord::new();
//! record.set("source", "Jora");
//! record.set("title", "Graduate Software Engineer");
//! assert_eq!(record.get("title"), Some("Graduate Software Engineer"));
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{JobscoutError, Result};
