//! `apply()`: apply a rewrite rule at a gate position, producing a new circuit.
//!
//! The input circuit is never mutated. Preconditions are re-checked here, so
//! a caller that skips [`applicable_rules`](crate::operators::rule::applicable_rules)
//! gets a typed failure instead of a malformed circuit.
//!
//! `CommuteForward` reverses the DAG edge between gate `i` and its partner
//! `j` and leaves every other dependency intact. The output list is
//! `gates[..i]`, then the gates in `(i, j)` that do not depend on `i`, then
//! `j`, `i`, the dependents of `i` in `(i, j)`, and `gates[j + 1..]`.

use crate::carrier::circuit::Circuit;
use crate::operators::rule::{is_applicable, partner_of, XferRule};

/// Typed failure for rule application. Fail-closed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    /// The gate position does not exist.
    #[error("gate index {index} out of range for circuit of {gate_count} gates")]
    IndexOutOfRange { index: usize, gate_count: usize },
    /// The rule's precondition does not hold at this position.
    #[error("{rule} is not applicable at gate {index}")]
    NotApplicable { rule: XferRule, index: usize },
}

/// Apply `rule` at gate `index`.
///
/// # Errors
///
/// Returns [`RewriteError::IndexOutOfRange`] for a bad position and
/// [`RewriteError::NotApplicable`] if the rule's precondition fails.
pub fn apply(circuit: &Circuit, index: usize, rule: XferRule) -> Result<Circuit, RewriteError> {
    if index >= circuit.gate_count() {
        return Err(RewriteError::IndexOutOfRange {
            index,
            gate_count: circuit.gate_count(),
        });
    }
    let partner = match partner_of(circuit, index, rule) {
        Some(partner) if is_applicable(circuit, index, rule) => partner,
        _ => return Err(RewriteError::NotApplicable { rule, index }),
    };

    let source = circuit.gates();
    let gates = match rule {
        XferRule::CancelInverse => {
            let mut gates = source.to_vec();
            gates.remove(partner);
            gates.remove(index);
            gates
        }
        XferRule::CommuteForward { .. } => {
            let dependents = circuit.dependents_between(index, partner);
            let mut gates = Vec::with_capacity(source.len());
            gates.extend_from_slice(&source[..index]);
            gates.extend(
                (index + 1..partner)
                    .filter(|k| dependents.binary_search(k).is_err())
                    .map(|k| source[k]),
            );
            gates.push(source[partner]);
            gates.push(source[index]);
            gates.extend(dependents.iter().map(|&k| source[k]));
            gates.extend_from_slice(&source[partner + 1..]);
            gates
        }
    };
    Ok(Circuit::from_valid_parts(circuit.qubit_count(), gates))
}
