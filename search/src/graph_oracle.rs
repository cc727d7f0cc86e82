//! `ExplicitGraphOracle`: a table-backed oracle over a hand-built state graph.
//!
//! States are node indices, fingerprints are the indices themselves, and every
//! rewrite is an explicit edge `(from, point, rule) -> to`. Points and rules
//! are enumerated in ascending order (`BTreeMap`), so expansion order is fully
//! determined by the table.
//!
//! Useful for exercising the engine on graphs with known distances, and for
//! injecting oracle failures via [`ExplicitGraphOracle::poison`].

use std::collections::{BTreeMap, BTreeSet};

use crate::contract::{OracleError, TransitionOracle};

#[derive(Debug, Clone, Default)]
struct GraphNode {
    cost: u64,
    /// point -> rule -> target node
    edges: BTreeMap<u32, BTreeMap<u32, usize>>,
}

/// Explicit rewrite graph with per-node costs.
#[derive(Debug, Clone, Default)]
pub struct ExplicitGraphOracle {
    nodes: Vec<GraphNode>,
    poisoned: BTreeSet<usize>,
}

impl ExplicitGraphOracle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state with the given cost; returns its index.
    pub fn add_state(&mut self, cost: u64) -> usize {
        self.nodes.push(GraphNode {
            cost,
            edges: BTreeMap::new(),
        });
        self.nodes.len() - 1
    }

    /// Add the rewrite `rule` at `point` of `from`, leading to `to`.
    ///
    /// A repeated `(from, point, rule)` replaces the earlier target.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` was not returned by [`Self::add_state`].
    pub fn add_rewrite(&mut self, from: usize, point: u32, rule: u32, to: usize) {
        assert!(to < self.nodes.len(), "unknown target state {to}");
        self.nodes[from]
            .edges
            .entry(point)
            .or_default()
            .insert(rule, to);
    }

    /// Make every oracle call on `state` fail.
    pub fn poison(&mut self, state: usize) {
        self.poisoned.insert(state);
    }

    fn node(&self, state: usize) -> Result<&GraphNode, OracleError> {
        if self.poisoned.contains(&state) {
            return Err(OracleError::new(format!("state {state} is poisoned")));
        }
        self.nodes
            .get(state)
            .ok_or_else(|| OracleError::new(format!("unknown state {state}")))
    }
}

impl TransitionOracle for ExplicitGraphOracle {
    type State = usize;
    type Point = u32;
    type Rule = u32;
    type Fingerprint = usize;
    type Cost = u64;

    #[allow(clippy::unnecessary_literal_bound)]
    fn oracle_id(&self) -> &str {
        "explicit_graph"
    }

    fn hash(&self, state: &usize) -> Result<usize, OracleError> {
        self.node(*state).map(|_| *state)
    }

    fn cost(&self, state: &usize) -> Result<u64, OracleError> {
        self.node(*state).map(|n| n.cost)
    }

    fn mutable_points(&self, state: &usize) -> Result<Vec<u32>, OracleError> {
        Ok(self.node(*state)?.edges.keys().copied().collect())
    }

    fn applicable_rules(&self, state: &usize, point: &u32) -> Result<Vec<u32>, OracleError> {
        Ok(self
            .node(*state)?
            .edges
            .get(point)
            .map(|rules| rules.keys().copied().collect())
            .unwrap_or_default())
    }

    fn apply(&self, state: &usize, point: &u32, rule: &u32) -> Result<usize, OracleError> {
        self.node(*state)?
            .edges
            .get(point)
            .and_then(|rules| rules.get(rule))
            .copied()
            .ok_or_else(|| {
                OracleError::new(format!(
                    "rule {rule} not applicable at point {point} of state {state}"
                ))
            })
    }
}
