//! Runtime configuration
//!
//! Environment variables provide the baseline; CLI flags override them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

fn default_max_pages() -> u32 {
    1
}

fn default_task_timeout_secs() -> u64 {
    300
}

fn default_output_path() -> PathBuf {
    PathBuf::from("job_lists.csv")
}

fn default_query() -> String {
    "visa sponsorship".to_string()
}

fn default_location() -> String {
    "Australia".to_string()
}

/// Configuration for one collection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Pages fetched per portal
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    /// Per-task deadline in seconds
    #[serde(default = "default_task_timeout_secs")]
    pub task_timeout_secs: u64,
    /// Artifact location
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Search query passed to every portal
    #[serde(default = "default_query")]
    pub query: String,
    /// Search location passed to every portal
    #[serde(default = "default_location")]
    pub location: String,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            task_timeout_secs: default_task_timeout_secs(),
            output_path: default_output_path(),
            query: default_query(),
            location: default_location(),
        }
    }
}

impl ScoutConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `JOBSCOUT_MAX_PAGES`: pages fetched per portal
    /// - `JOBSCOUT_TIMEOUT_SECS`: per-task deadline in seconds
    /// - `JOBSCOUT_OUTPUT`: artifact location
    /// - `JOBSCOUT_QUERY`: portal search query
    /// - `JOBSCOUT_LOCATION`: portal search location
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self {
            max_pages: std::env::var("JOBSCOUT_MAX_PAGES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_max_pages),
            task_timeout_secs: std::env::var("JOBSCOUT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_task_timeout_secs),
            output_path: std::env::var("JOBSCOUT_OUTPUT")
                .ok()
                .map(PathBuf::from)
                .unwrap_or_else(default_output_path),
            query: std::env::var("JOBSCOUT_QUERY").unwrap_or_else(|_| default_query()),
            location: std::env::var("JOBSCOUT_LOCATION").unwrap_or_else(|_| default_location()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_pages == 0 {
            anyhow::bail!("max_pages must be greater than 0");
        }
        if self.task_timeout_secs == 0 {
            anyhow::bail!("timeout must be greater than 0 seconds");
        }
        if self.query.trim().is_empty() {
            anyhow::bail!("search query cannot be empty");
        }
        if self.output_path.as_os_str().is_empty() {
            anyhow::bail!("output path cannot be empty");
        }
        Ok(())
    }

    /// Per-task deadline as a Duration
    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.task_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScoutConfig::default();
        assert_eq!(config.max_pages, 1);
        assert_eq!(config.task_timeout_secs, 300);
        assert_eq!(config.output_path, PathBuf::from("job_lists.csv"));
        assert_eq!(config.query, "visa sponsorship");
        assert_eq!(config.location, "Australia");
    }

    #[test]
    fn test_default_is_valid() {
        assert!(ScoutConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_max_pages_is_invalid() {
        let config = ScoutConfig {
            max_pages: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = ScoutConfig {
            task_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_query_is_invalid() {
        let config = ScoutConfig {
            query: "   ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_task_timeout_duration() {
        let config = ScoutConfig {
            task_timeout_secs: 120,
            ..Default::default()
        };
        assert_eq!(config.task_timeout(), Duration::from_secs(120));
    }
}
