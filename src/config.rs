//! Benchmark run configuration (`config.json` in the results directory).
//!
//! This is the one input the pipeline refuses to run without: variant
//! order, run count, and leak-cycle count shape the whole aggregation, so
//! a missing or invalid config halts before any artifact is touched.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config not found: {0}")]
    NotFound(String),
    #[error("config unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("config invalid: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Harness configuration as written by the benchmark driver.
///
/// Unknown keys are carried through `extra` so `summary.json` echoes the
/// exact configuration the harness recorded, not a lossy subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Variant identifiers in presentation order. Opaque to the pipeline.
    pub variants: Vec<String>,
    /// Benchmark repetitions per variant.
    pub runs: u32,
    /// Leak-detection cycles per run.
    pub leak_cycles: u32,
    /// Scenario name -> load-generator arguments, echoed into the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenarios: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl BenchConfig {
    /// Load and validate `config.json`. Missing file and missing required
    /// keys are both fatal; this is the only fatal path in the pipeline.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
