//! `CircuitXfer`: the `{h, cx, t, tdg}` circuit world as a transition oracle.
//!
//! - State: [`Circuit`]
//! - Fingerprint: canonical DAG-order content hash
//! - Cost: gate count
//! - Mutable points: gate positions `0..gate_count`
//! - Rules: [`XferRule`], applicability decided by the kernel

use xferdepth_kernel::carrier::circuit::Circuit;
use xferdepth_kernel::operators::apply::apply;
use xferdepth_kernel::operators::rule::{applicable_rules, XferRule};
use xferdepth_kernel::proof::fingerprint::circuit_fingerprint;
use xferdepth_kernel::proof::hash::ContentHash;

use xferdepth_search::contract::{OracleError, TransitionOracle};

/// Circuit rewrite world backed by the kernel's rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircuitXfer;

impl TransitionOracle for CircuitXfer {
    type State = Circuit;
    type Point = usize;
    type Rule = XferRule;
    type Fingerprint = ContentHash;
    type Cost = usize;

    #[allow(clippy::unnecessary_literal_bound)]
    fn oracle_id(&self) -> &str {
        "circuit_xfer"
    }

    fn hash(&self, state: &Circuit) -> Result<ContentHash, OracleError> {
        Ok(circuit_fingerprint(state))
    }

    fn cost(&self, state: &Circuit) -> Result<usize, OracleError> {
        Ok(state.gate_count())
    }

    fn mutable_points(&self, state: &Circuit) -> Result<Vec<usize>, OracleError> {
        Ok((0..state.gate_count()).collect())
    }

    fn applicable_rules(
        &self,
        state: &Circuit,
        point: &usize,
    ) -> Result<Vec<XferRule>, OracleError> {
        applicable_rules(state, *point).map_err(|e| OracleError::new(e.to_string()))
    }

    fn apply(&self, state: &Circuit, point: &usize, rule: &XferRule) -> Result<Circuit, OracleError> {
        apply(state, *point, *rule).map_err(|e| OracleError::new(e.to_string()))
    }
}
