//! Rewrite rule identifiers and applicability.
//!
//! A rule is applied at a gate position `i` (the mutable point) and pairs it
//! with a partner `j`: the DAG successor of gate `i` on one of its wires (see
//! [`Circuit::next_on_qubit`]). Both rules are stated on the gate DAG, so
//! every list order of the same DAG offers the same rewrites.
//!
//! | Rule                       | Partner `j`                  | Precondition                   | Cost |
//! |----------------------------|------------------------------|--------------------------------|------|
//! | `CancelInverse`            | successor on first wire of `i` | `j` inverts `i`, adjacent    | -2   |
//! | `CommuteForward { qubit }` | successor on wire `qubit`    | `i` and `j` commute, adjacent  | 0    |
//!
//! "Adjacent" means no gate that depends on `i` is also a predecessor of `j`:
//! no dependent of `i` listed between them touches a wire of `j`. Cancelling
//! an adjacent pair, or swapping it, keeps the DAG acyclic.
//!
//! Neither rule increases the gate count.

use std::fmt;

use crate::carrier::circuit::Circuit;
use crate::operators::apply::RewriteError;

/// A rewrite rule identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum XferRule {
    /// Remove a gate together with its inverse partner.
    CancelInverse,
    /// Move the successor on wire `qubit` in front of the gate.
    CommuteForward { qubit: u32 },
}

impl XferRule {
    /// Stable rule name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CancelInverse => "cancel_inverse",
            Self::CommuteForward { .. } => "commute_forward",
        }
    }
}

impl fmt::Display for XferRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CancelInverse => f.write_str(self.name()),
            Self::CommuteForward { qubit } => write!(f, "{}@q{qubit}", self.name()),
        }
    }
}

/// The partner gate `rule` pairs with gate `index`, if it exists.
#[must_use]
pub fn partner_of(circuit: &Circuit, index: usize, rule: XferRule) -> Option<usize> {
    let gate = circuit.gates().get(index)?;
    let qubit = match rule {
        XferRule::CancelInverse => gate.qubit_pair().0,
        XferRule::CommuteForward { qubit } => qubit,
    };
    if !gate.touches(qubit) {
        return None;
    }
    circuit.next_on_qubit(index, qubit)
}

/// Whether `rule` can be applied at gate `index`.
///
/// Out-of-range indices are never applicable.
#[must_use]
pub fn is_applicable(circuit: &Circuit, index: usize, rule: XferRule) -> bool {
    let Some(partner) = partner_of(circuit, index, rule) else {
        return false;
    };
    let gates = circuit.gates();
    let (gate, other) = (gates[index], gates[partner]);
    let matches = match rule {
        XferRule::CancelInverse => other == gate.inverse(),
        XferRule::CommuteForward { .. } => other != gate && gate.commutes_with(&other),
    };
    matches
        && circuit
            .dependents_between(index, partner)
            .into_iter()
            .all(|k| !gates[k].shares_qubit(&other))
}

/// Rules applicable at gate `index`: `CancelInverse` first, then one
/// `CommuteForward` per distinct wire successor, first wire first.
///
/// # Errors
///
/// Returns [`RewriteError::IndexOutOfRange`] if `index` is not a gate
/// position of `circuit`.
pub fn applicable_rules(circuit: &Circuit, index: usize) -> Result<Vec<XferRule>, RewriteError> {
    let Some(gate) = circuit.gates().get(index) else {
        return Err(RewriteError::IndexOutOfRange {
            index,
            gate_count: circuit.gate_count(),
        });
    };

    let mut rules = Vec::new();
    if is_applicable(circuit, index, XferRule::CancelInverse) {
        rules.push(XferRule::CancelInverse);
    }
    let (a, b) = gate.qubit_pair();
    let mut seen: Option<usize> = None;
    for qubit in [Some(a), b].into_iter().flatten() {
        let Some(partner) = circuit.next_on_qubit(index, qubit) else {
            continue;
        };
        // A partner on both wires is offered once.
        if seen == Some(partner) {
            continue;
        }
        seen = Some(partner);
        let rule = XferRule::CommuteForward { qubit };
        if is_applicable(circuit, index, rule) {
            rules.push(rule);
        }
    }
    Ok(rules)
}
