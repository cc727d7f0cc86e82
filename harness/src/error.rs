//! Driver error types.
//!
//! Input-data problems (missing shard, corrupt corpus, unparsable QASM) are
//! kept apart from search failures so a batch report can tell "the data is
//! bad" from "the engine or oracle failed".

use std::fmt;
use std::path::PathBuf;

use xferdepth_search::error::SearchError;

use crate::shards::DepthLabel;

/// A label that the re-derived depth disagrees with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// The precomputed label.
    pub label: DepthLabel,
    /// Corpus id of the sampled entry the label pointed at.
    pub entry_id: String,
    /// The re-derived label (`-1` when not found).
    pub computed: DepthLabel,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "label {} entry {}: computed {}",
            self.label, self.entry_id, self.computed
        )
    }
}

/// Error during a verification batch.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// Configuration rejected before any work was done.
    #[error("invalid configuration: {detail}")]
    Config { detail: String },

    /// A shard, the corpus, or a corpus entry could not be read or parsed.
    #[error("input data error in {}: {detail}", source_path.display())]
    InputData { source_path: PathBuf, detail: String },

    /// The search engine failed while verifying `label`.
    #[error("search failed for label {label}")]
    Search {
        label: DepthLabel,
        #[source]
        source: SearchError,
    },

    /// An artifact could not be written.
    #[error("cannot write {}: {detail}", path.display())]
    Output { path: PathBuf, detail: String },

    /// At least one label disagreed with the re-derived depth.
    #[error("{} label(s) failed verification: {}", mismatches.len(), join_mismatches(mismatches))]
    VerificationFailed { mismatches: Vec<Mismatch> },

    /// The `jobs > 1` thread pool could not be built.
    #[error("worker pool: {detail}")]
    WorkerPool { detail: String },
}

impl DriverError {
    pub(crate) fn input(path: impl Into<PathBuf>, detail: impl fmt::Display) -> Self {
        Self::InputData {
            source_path: path.into(),
            detail: detail.to_string(),
        }
    }
}

fn join_mismatches(mismatches: &[Mismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
