//! Search entry point and expansion loop.
//!
//! Breadth-first, level by level. For each dequeued state, every rule at
//! every mutable point is applied in oracle order, and each child goes
//! through three checks in a fixed order:
//!
//! 1. **Improvement**: cost strictly below the initial cost ends the search
//!    at the parent's depth + 1. All shallower states were fully expanded
//!    before this one, so the depth is minimal.
//! 2. **Dedup**: an unseen fingerprint is recorded at the parent's depth + 1
//!    and enqueued. A seen one keeps its first depth.
//! 3. **Bound**: if the fingerprint's recorded depth exceeds `max_depth`,
//!    the search ends as not found without draining the level.
//!
//! An emptied frontier is reported as not found, not treated as a fault.

use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use crate::contract::{OracleOperation, TransitionOracle};
use crate::error::SearchError;
use crate::frontier::BfsFrontier;
use crate::policy::SearchPolicy;

/// Why no improving state was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// A state was recorded at `depth`, beyond the bound.
    DepthBoundExceeded { depth: u32 },
    /// Every reachable state was expanded without improvement.
    FrontierExhausted,
    /// The policy's wall-clock deadline passed.
    DeadlineElapsed,
}

/// Terminal outcome of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A strictly cheaper state is reachable in `depth` rewrites, and none
    /// is reachable in fewer.
    Improved { depth: u32 },
    NotFound(NotFoundReason),
}

impl SearchOutcome {
    /// Minimal improving depth, or `None` if not found.
    #[must_use]
    pub fn depth(&self) -> Option<u32> {
        match *self {
            Self::Improved { depth } => Some(depth),
            Self::NotFound(_) => None,
        }
    }
}

/// Counters collected during one search. Deterministic for a given oracle,
/// initial state and policy (the deadline aside).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States dequeued and expanded.
    pub expansions: u64,
    /// Rewrites applied.
    pub candidates_generated: u64,
    /// Children whose fingerprint was already recorded.
    pub duplicates_suppressed: u64,
    /// Distinct fingerprints recorded, including the initial state.
    pub states_discovered: u64,
    /// Largest frontier length observed.
    pub frontier_high_water: u64,
    /// Largest depth recorded in the visited map.
    pub deepest_recorded: u32,
}

/// Result of a search execution.
#[derive(Debug, Clone)]
pub struct SearchReport<F> {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
    /// Fingerprints in dequeue order; empty unless
    /// [`SearchPolicy::record_expansion_order`] is set.
    pub expansion_order: Vec<F>,
}

/// Run the bounded breadth-first search from `initial_state`.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] before any oracle call if the
/// policy is rejected, and [`SearchError::Oracle`] as soon as any oracle
/// call fails.
pub fn search<O>(
    oracle: &O,
    initial_state: O::State,
    policy: &SearchPolicy,
) -> Result<SearchReport<O::Fingerprint>, SearchError>
where
    O: TransitionOracle + ?Sized,
{
    policy.validate()?;

    let span = info_span!("bfs", oracle = oracle.oracle_id(), max_depth = policy.max_depth);
    let _enter = span.enter();
    let started = Instant::now();

    let initial_cost = oracle
        .cost(&initial_state)
        .map_err(SearchError::oracle(OracleOperation::Cost))?;
    let initial_fp = oracle
        .hash(&initial_state)
        .map_err(SearchError::oracle(OracleOperation::Hash))?;
    debug!(?initial_cost, ?initial_fp, "search started");

    let mut frontier = BfsFrontier::with_capacity(policy.frontier_capacity);
    frontier.discover(initial_state, initial_fp, 0);

    let mut stats = SearchStats::default();
    let mut expansion_order = Vec::new();

    let outcome: SearchOutcome = 'search: loop {
        let Some(entry) = frontier.pop() else {
            break NotFoundReason::FrontierExhausted.into();
        };
        stats.expansions += 1;
        if policy.record_expansion_order {
            expansion_order.push(entry.fingerprint.clone());
        }
        let child_depth = entry.depth + 1;

        let points = oracle
            .mutable_points(&entry.state)
            .map_err(SearchError::oracle(OracleOperation::MutablePoints))?;
        for point in &points {
            let rules = oracle
                .applicable_rules(&entry.state, point)
                .map_err(SearchError::oracle(OracleOperation::ApplicableRules))?;
            for rule in &rules {
                let child = oracle
                    .apply(&entry.state, point, rule)
                    .map_err(SearchError::oracle(OracleOperation::Apply))?;
                stats.candidates_generated += 1;

                let child_cost = oracle
                    .cost(&child)
                    .map_err(SearchError::oracle(OracleOperation::Cost))?;
                if child_cost < initial_cost {
                    break 'search SearchOutcome::Improved { depth: child_depth };
                }

                let child_fp = oracle
                    .hash(&child)
                    .map_err(SearchError::oracle(OracleOperation::Hash))?;
                let discovery = frontier.discover(child, child_fp, child_depth);
                if !discovery.is_new() {
                    stats.duplicates_suppressed += 1;
                }
                let recorded = discovery.depth();
                stats.deepest_recorded = stats.deepest_recorded.max(recorded);

                if recorded > policy.max_depth {
                    break 'search NotFoundReason::DepthBoundExceeded { depth: recorded }.into();
                }

                if policy.progress_interval > 0
                    && stats.candidates_generated % policy.progress_interval == 0
                {
                    info!(
                        searched = stats.candidates_generated,
                        depth = recorded,
                        "search progress"
                    );
                }

                if policy.deadline.is_some_and(|d| started.elapsed() >= d) {
                    break 'search NotFoundReason::DeadlineElapsed.into();
                }
            }
        }
    };

    stats.states_discovered = frontier.visited_len() as u64;
    stats.frontier_high_water = frontier.high_water();

    match outcome {
        SearchOutcome::Improved { depth } => {
            info!(depth, expansions = stats.expansions, "improvement found");
        }
        SearchOutcome::NotFound(NotFoundReason::FrontierExhausted) => {
            warn!(
                states = stats.states_discovered,
                "frontier exhausted without improvement"
            );
        }
        SearchOutcome::NotFound(reason) => {
            info!(?reason, expansions = stats.expansions, "no improvement within bound");
        }
    }
    debug!(elapsed = ?started.elapsed(), ?stats, "search finished");

    Ok(SearchReport {
        outcome,
        stats,
        expansion_order,
    })
}

impl From<NotFoundReason> for SearchOutcome {
    fn from(reason: NotFoundReason) -> Self {
        Self::NotFound(reason)
    }
}

/// Minimum number of rewrites from `initial_state` to a strictly cheaper
/// state, or `None` if none is found within `max_depth`.
///
/// # Errors
///
/// See [`search`].
pub fn find_min_improving_depth<O>(
    oracle: &O,
    initial_state: O::State,
    max_depth: u32,
) -> Result<Option<u32>, SearchError>
where
    O: TransitionOracle + ?Sized,
{
    search(oracle, initial_state, &SearchPolicy::with_max_depth(max_depth))
        .map(|report| report.outcome.depth())
}
