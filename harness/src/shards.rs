//! Sharded depth labels.
//!
//! Shard `i` lives at `<dir>/<i>.json` and holds a JSON array of integer
//! labels. Position `p` in shard `i` refers to global sample index
//! `p + i * stride`. Labels are merged into a single `label -> global index`
//! map; the first occurrence wins, shards visited in index order.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::DriverError;

/// A precomputed depth label. [`NOT_FOUND_LABEL`] means "no improvement
/// within the bound".
pub type DepthLabel = i64;

/// Label recorded for states with no improving rewrite sequence.
pub const NOT_FOUND_LABEL: DepthLabel = -1;

/// Path of shard `index` under `dir`.
#[must_use]
pub fn shard_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{index}.json"))
}

/// Read one shard.
///
/// # Errors
///
/// Returns [`DriverError::InputData`] if the file is missing or is not a
/// JSON array of integers.
pub fn load_shard(path: &Path) -> Result<Vec<DepthLabel>, DriverError> {
    let text = fs::read_to_string(path).map_err(|e| DriverError::input(path, e))?;
    serde_json::from_str(&text).map_err(|e| DriverError::input(path, e))
}

/// Merge shard label arrays into `label -> global index`.
///
/// `shards[i]` is shard `i`. The first occurrence of a label, scanning
/// shards in order and positions within a shard in order, wins.
#[must_use]
pub fn merge_shard_labels(shards: &[Vec<DepthLabel>], stride: usize) -> BTreeMap<DepthLabel, usize> {
    let mut merged = BTreeMap::new();
    for (shard_index, labels) in shards.iter().enumerate() {
        for (position, &label) in labels.iter().enumerate() {
            merged.entry(label).or_insert(position + shard_index * stride);
        }
    }
    merged
}

/// Load shards `0..count` from `dir` and merge them.
///
/// # Errors
///
/// Returns [`DriverError::InputData`] if a shard is missing, malformed, or
/// longer than `stride` (its positions would alias the next shard's).
pub fn load_and_merge_shards(
    dir: &Path,
    count: usize,
    stride: usize,
) -> Result<BTreeMap<DepthLabel, usize>, DriverError> {
    let mut shards = Vec::with_capacity(count);
    for index in 0..count {
        let path = shard_path(dir, index);
        let labels = load_shard(&path)?;
        if labels.len() > stride {
            return Err(DriverError::input(
                &path,
                format!("{} labels exceed shard stride {stride}", labels.len()),
            ));
        }
        debug!(shard = index, labels = labels.len(), "loaded shard");
        shards.push(labels);
    }
    Ok(merge_shard_labels(&shards, stride))
}
