//! State-transition oracle contract trait.

use std::fmt;
use std::hash::Hash;

/// Failure reported by an oracle call.
///
/// The search engine never inspects or recovers from this; it is wrapped in
/// [`crate::error::SearchError::Oracle`] and returned to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct OracleError {
    pub detail: String,
}

impl OracleError {
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Which oracle operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleOperation {
    Hash,
    Cost,
    MutablePoints,
    ApplicableRules,
    Apply,
}

impl fmt::Display for OracleOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hash => "hash",
            Self::Cost => "cost",
            Self::MutablePoints => "mutable_points",
            Self::ApplicableRules => "applicable_rules",
            Self::Apply => "apply",
        })
    }
}

/// Trait for rewrite systems the search engine can explore.
///
/// # Contract
///
/// - States are immutable: `apply` returns a new state and leaves the input
///   untouched.
/// - `hash` is a stable identity. Two states with equal fingerprints are
///   treated as the same state.
/// - Enumeration must be deterministic: the same state yields the same
///   points, and the same `(state, point)` yields the same rules, in the same
///   order. Expansion order and therefore the reported statistics depend on it.
/// - Every rule returned by `applicable_rules(state, point)` must succeed in
///   `apply(state, point, rule)`. A failure there is surfaced unchanged.
pub trait TransitionOracle {
    type State;
    type Point;
    type Rule;
    type Fingerprint: Eq + Hash + Clone + fmt::Debug;
    type Cost: Ord + Copy + fmt::Debug;

    /// Identifier used in log spans.
    fn oracle_id(&self) -> &str;

    /// Content hash of `state`.
    fn hash(&self, state: &Self::State) -> Result<Self::Fingerprint, OracleError>;

    /// Cost metric of `state`; lower is better.
    fn cost(&self, state: &Self::State) -> Result<Self::Cost, OracleError>;

    /// Locations in `state` where rewrites may apply, in a stable order.
    fn mutable_points(&self, state: &Self::State) -> Result<Vec<Self::Point>, OracleError>;

    /// Rules applicable at `point`, in a stable order.
    fn applicable_rules(
        &self,
        state: &Self::State,
        point: &Self::Point,
    ) -> Result<Vec<Self::Rule>, OracleError>;

    /// Apply `rule` at `point`, producing a new state.
    fn apply(
        &self,
        state: &Self::State,
        point: &Self::Point,
        rule: &Self::Rule,
    ) -> Result<Self::State, OracleError>;
}
