//! Engine configuration.
//!
//! This module provides [`EngineConfig`], the runtime settings for the
//! reporting and document-lifecycle services, loaded from a YAML file.
//! All settings have defaults so the engine can run without a config file.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Settings for bulk document operations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BulkConfig {
    /// Maximum number of bulk items processed concurrently.
    pub concurrency: usize,
    /// Per-item timeout in milliseconds. A slow upload or email for one
    /// employee counts as that item's failure, never the batch's.
    pub item_timeout_ms: u64,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            item_timeout_ms: 10_000,
        }
    }
}

/// Settings for report aggregation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Number of users returned by the top-users ranking.
    pub top_users_limit: usize,
    /// Daily hours treated as 100% productivity.
    pub productivity_baseline_hours: f64,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            top_users_limit: 10,
            productivity_baseline_hours: 8.0,
        }
    }
}

/// Settings for outbound tax-document email.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Sender address for tax-document delivery.
    pub sender: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            sender: "payroll@example.com".to_string(),
        }
    }
}

/// Runtime configuration for the payroll reporting engine.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::EngineConfig;
///
/// let config = EngineConfig::load("./config/engine.yaml")?;
/// assert!(config.bulk.concurrency > 0);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Bulk operation settings.
    pub bulk: BulkConfig,
    /// Report aggregation settings.
    pub reporting: ReportingConfig,
    /// Outbound email settings.
    pub email: EmailConfig,
}

impl EngineConfig {
    /// Loads configuration from a YAML file.
    ///
    /// Returns [`EngineError::ConfigNotFound`] when the file is missing and
    /// [`EngineError::ConfigParseError`] when it contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
