//! Verification runner: re-derives sampled depth labels through the search
//! engine.
//!
//! The runner uses ONLY harness loaders, the kernel QASM parser and
//! `xferdepth_search::search::search`. It does not implement any search
//! logic itself.
//!
//! # Pipeline
//!
//! ```text
//! DriverConfig::validate()
//!   → load_and_merge_shards() → Corpus::load() → Corpus::sample()
//!   → resolve_targets()                       (label → sampled entry)
//!   → [parse_qasm() → search()] × N           (sequential or rayon pool)
//!   → compare → write_step_artifact()         (label order)
//!   → VerificationReport | DriverError::VerificationFailed
//! ```
//!
//! Searches are independent, so `jobs > 1` only changes how many run at
//! once. Comparison and artifact writing always happen afterwards on the
//! calling thread, in ascending label order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use xferdepth_kernel::carrier::qasm::parse_qasm;
use xferdepth_search::policy::SearchPolicy;
use xferdepth_search::search::{search, NotFoundReason, SearchOutcome, SearchStats};

use crate::artifacts::write_step_artifact;
use crate::config::DriverConfig;
use crate::corpus::{Corpus, SampledEntry};
use crate::error::{DriverError, Mismatch};
use crate::shards::{load_and_merge_shards, DepthLabel, NOT_FOUND_LABEL};
use crate::worlds::circuit_xfer::CircuitXfer;

/// A label paired with the sampled entry it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationTarget {
    pub label: DepthLabel,
    /// Global sample index the label was recorded for.
    pub global_index: usize,
    pub sampled: SampledEntry,
}

/// A label whose re-derived depth matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSample {
    pub label: DepthLabel,
    pub entry_id: String,
    pub stats: SearchStats,
    /// The `step<label>.qasm` file written for this sample.
    pub artifact: PathBuf,
}

/// Outcome of a batch in which no search failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    /// Matching labels, ascending.
    pub verified: Vec<VerifiedSample>,
    /// Disagreeing labels, ascending.
    pub mismatches: Vec<Mismatch>,
    /// Set when `fail_fast` stopped the batch before every label was checked.
    pub stopped_early: bool,
}

impl VerificationReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Run a full batch described by `config`.
///
/// Every verified sample is written before the batch result is decided, so
/// artifacts for matching labels exist even when the batch fails.
///
/// # Errors
///
/// - [`DriverError::Config`] / [`DriverError::InputData`] before any search
/// - [`DriverError::Search`] if an oracle or policy error aborts a search
/// - [`DriverError::Output`] if an artifact cannot be written
/// - [`DriverError::VerificationFailed`] listing every mismatch
pub fn run_verification(config: &DriverConfig) -> Result<VerificationReport, DriverError> {
    config.validate()?;
    let span = info_span!("verify_batch", seed = config.seed, max_depth = config.max_depth);
    let _guard = span.enter();

    let labels = load_and_merge_shards(&config.shard_dir, config.shard_count, config.shard_stride)?;
    info!(distinct_labels = labels.len(), "merged shards");

    let corpus = Corpus::load(&config.corpus_path)?;
    let sample = corpus.sample(config.sample_size, config.seed, &config.corpus_path)?;
    info!(
        corpus_entries = corpus.len(),
        sampled = sample.len(),
        "sampled corpus"
    );

    let targets = resolve_targets(&labels, &sample, &config.corpus_path)?;
    let report = verify_targets(&targets, config)?;

    info!(
        verified = report.verified.len(),
        mismatches = report.mismatches.len(),
        stopped_early = report.stopped_early,
        "batch complete"
    );
    if report.is_clean() {
        Ok(report)
    } else {
        Err(DriverError::VerificationFailed {
            mismatches: report.mismatches,
        })
    }
}

/// Pair each label with the sampled entry at its global index.
///
/// # Errors
///
/// Returns [`DriverError::InputData`] (attributed to `corpus_path`) if a
/// global index falls outside the sample.
pub fn resolve_targets(
    labels: &BTreeMap<DepthLabel, usize>,
    sample: &[SampledEntry],
    corpus_path: &Path,
) -> Result<Vec<VerificationTarget>, DriverError> {
    labels
        .iter()
        .map(|(&label, &global_index)| -> Result<VerificationTarget, DriverError> {
            let sampled = sample.get(global_index).ok_or_else(|| {
                DriverError::input(
                    corpus_path,
                    format!(
                        "label {label} points at sample index {global_index}, sample has {}",
                        sample.len()
                    ),
                )
            })?;
            Ok(VerificationTarget {
                label,
                global_index,
                sampled: sampled.clone(),
            })
        })
        .collect()
}

/// Verify `targets` (ascending label order) and write artifacts for the
/// matches. Mismatches are collected, not returned as an error.
///
/// # Errors
///
/// [`DriverError::InputData`] for unparsable QASM, [`DriverError::Search`]
/// for a failed search, [`DriverError::Output`] for a failed write,
/// [`DriverError::WorkerPool`] if `jobs > 1` and the pool cannot be built.
pub fn verify_targets(
    targets: &[VerificationTarget],
    config: &DriverConfig,
) -> Result<VerificationReport, DriverError> {
    let policy = config.search_policy();
    let mut report = VerificationReport::default();

    if config.jobs > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.jobs)
            .build()
            .map_err(|e| DriverError::WorkerPool {
                detail: e.to_string(),
            })?;
        let checked: Vec<Checked> = pool.install(|| {
            targets
                .par_iter()
                .map(|target| check_target(target, &policy, &config.corpus_path))
                .collect::<Result<Vec<Checked>, DriverError>>()
        })?;
        for (target, checked) in targets.iter().zip(checked) {
            record(&mut report, target, checked, &config.output_dir)?;
        }
        return Ok(report);
    }

    for target in targets {
        let checked = check_target(target, &policy, &config.corpus_path)?;
        let matched = record(&mut report, target, checked, &config.output_dir)?;
        if !matched && config.fail_fast {
            report.stopped_early = true;
            warn!(label = target.label, "fail_fast: stopping at first mismatch");
            break;
        }
    }
    Ok(report)
}

/// Re-derived label for one target.
#[derive(Debug)]
struct Checked {
    computed: DepthLabel,
    stats: SearchStats,
}

fn check_target(
    target: &VerificationTarget,
    policy: &SearchPolicy,
    corpus_path: &Path,
) -> Result<Checked, DriverError> {
    let SampledEntry { id, entry } = &target.sampled;
    let circuit = parse_qasm(&entry.qasm)
        .map_err(|e| DriverError::input(corpus_path, format!("entry {id}: {e}")))?;
    if circuit.gate_count() as u64 != entry.gate_count {
        warn!(
            entry = %id,
            recorded = entry.gate_count,
            parsed = circuit.gate_count(),
            "recorded gate count disagrees with circuit"
        );
    }

    debug!(label = target.label, entry = %id, digest = %entry.digest(), "searching");
    let report = search(&CircuitXfer, circuit, policy).map_err(|source| DriverError::Search {
        label: target.label,
        source,
    })?;

    let computed = match report.outcome {
        SearchOutcome::Improved { depth } => DepthLabel::from(depth),
        SearchOutcome::NotFound(reason) => {
            if reason == NotFoundReason::DeadlineElapsed {
                warn!(label = target.label, entry = %id, "deadline elapsed; reporting not found");
            }
            NOT_FOUND_LABEL
        }
    };
    Ok(Checked {
        computed,
        stats: report.stats,
    })
}

/// Fold one result into the report. Returns whether the label matched.
fn record(
    report: &mut VerificationReport,
    target: &VerificationTarget,
    checked: Checked,
    output_dir: &Path,
) -> Result<bool, DriverError> {
    let entry_id = target.sampled.id.clone();
    if checked.computed != target.label {
        warn!(
            label = target.label,
            computed = checked.computed,
            entry = %entry_id,
            "label mismatch"
        );
        report.mismatches.push(Mismatch {
            label: target.label,
            entry_id,
            computed: checked.computed,
        });
        return Ok(false);
    }

    let artifact = write_step_artifact(output_dir, target.label, &target.sampled.entry.qasm)?;
    info!(
        label = target.label,
        entry = %entry_id,
        expansions = checked.stats.expansions,
        "label verified"
    );
    report.verified.push(VerifiedSample {
        label: target.label,
        entry_id,
        stats: checked.stats,
        artifact,
    });
    Ok(true)
}
