//! Driver configuration.
//!
//! Loaded from a JSON file; every field has a default, so `{}` is a valid
//! configuration. Unknown fields are rejected.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use xferdepth_search::policy::{SearchPolicy, DEFAULT_MAX_DEPTH, DEFAULT_PROGRESS_INTERVAL};

use crate::error::DriverError;

/// Everything one verification batch needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Directory holding `<i>.json` label shards.
    pub shard_dir: PathBuf,
    /// Number of shards, read as `0..shard_count`.
    pub shard_count: usize,
    /// Global sample indices covered by each shard.
    pub shard_stride: usize,
    /// JSON corpus `id -> [qasm, gate_count]`.
    pub corpus_path: PathBuf,
    /// Entries drawn from the corpus.
    pub sample_size: usize,
    pub seed: u64,
    /// Depth bound handed to every search.
    pub max_depth: u32,
    /// Where `step<label>.qasm` files are written.
    pub output_dir: PathBuf,
    /// Independent searches run at once. 1 keeps everything on the caller's
    /// thread.
    pub jobs: usize,
    /// Stop at the first mismatch (sequential runs only).
    pub fail_fast: bool,
    /// Candidates between search progress events (0 = off).
    pub progress_interval: u64,
    /// Per-search wall-clock budget in seconds.
    pub deadline_secs: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            shard_dir: PathBuf::from("tmp"),
            shard_count: 80,
            shard_stride: 125,
            corpus_path: PathBuf::from("data/corpus.json"),
            sample_size: 10_000,
            seed: 12345,
            max_depth: DEFAULT_MAX_DEPTH,
            output_dir: PathBuf::from("output"),
            jobs: 1,
            fail_fast: false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            deadline_secs: None,
        }
    }
}

impl DriverConfig {
    /// Read and validate a configuration file.
    ///
    /// # Errors
    ///
    /// [`DriverError::InputData`] if the file cannot be read or parsed,
    /// [`DriverError::Config`] if the values are inconsistent.
    pub fn load(path: &Path) -> Result<Self, DriverError> {
        let text = fs::read_to_string(path).map_err(|e| DriverError::input(path, e))?;
        let config: Self = serde_json::from_str(&text).map_err(|e| DriverError::input(path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`DriverError::Config`] naming the first bad field.
    pub fn validate(&self) -> Result<(), DriverError> {
        let bad = |detail: &str| {
            Err(DriverError::Config {
                detail: detail.to_owned(),
            })
        };
        if self.max_depth == 0 {
            return bad("max_depth must be at least 1");
        }
        if self.shard_stride == 0 {
            return bad("shard_stride must be at least 1");
        }
        if self.jobs == 0 {
            return bad("jobs must be at least 1");
        }
        Ok(())
    }

    /// Policy for each search in the batch.
    #[must_use]
    pub fn search_policy(&self) -> SearchPolicy {
        SearchPolicy {
            max_depth: self.max_depth,
            progress_interval: self.progress_interval,
            deadline: self.deadline_secs.map(Duration::from_secs),
            ..SearchPolicy::default()
        }
    }
}
