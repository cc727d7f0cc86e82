//! `Circuit`: an immutable gate list over a fixed qubit register.
//!
//! # Equality semantics
//!
//! Two circuits whose gate lists differ only in the relative order of
//! independent gates (no shared qubit) implement the same gate DAG.
//! [`Circuit::identity_bytes`] serializes the DAG, not the list: gates are
//! emitted in canonical topological order (Kahn's algorithm, smallest ready
//! gate first by `Gate`'s `Ord`). Search dedup must use the identity bytes,
//! never the raw list.

use std::collections::BTreeSet;

use crate::carrier::gate::Gate;

/// Failure constructing a circuit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CircuitError {
    /// A gate addresses a qubit outside the register.
    #[error("gate {index} ({gate}) addresses qubit {qubit} outside register of {qubit_count}")]
    QubitOutOfRange {
        index: usize,
        gate: Gate,
        qubit: u32,
        qubit_count: u32,
    },
    /// A `cx` gate uses the same qubit as control and target.
    #[error("gate {index} has control equal to target ({qubit})")]
    DegenerateCx { index: usize, qubit: u32 },
}

/// An ordered gate list acting on `qubit_count` qubits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    qubit_count: u32,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Build a circuit, validating every gate against the register.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitError`] if a gate addresses a qubit `>= qubit_count`
    /// or a `cx` has `control == target`.
    pub fn new(qubit_count: u32, gates: Vec<Gate>) -> Result<Self, CircuitError> {
        for (index, gate) in gates.iter().enumerate() {
            if let Gate::Cx { control, target } = *gate {
                if control == target {
                    return Err(CircuitError::DegenerateCx {
                        index,
                        qubit: control,
                    });
                }
            }
            let qubit = gate.max_qubit();
            if qubit >= qubit_count {
                return Err(CircuitError::QubitOutOfRange {
                    index,
                    gate: *gate,
                    qubit,
                    qubit_count,
                });
            }
        }
        Ok(Self { qubit_count, gates })
    }

    /// Rebuild from a gate list already derived from a valid circuit on the
    /// same register.
    pub(crate) fn from_valid_parts(qubit_count: u32, gates: Vec<Gate>) -> Self {
        Self { qubit_count, gates }
    }

    /// Register width.
    #[must_use]
    pub fn qubit_count(&self) -> u32 {
        self.qubit_count
    }

    /// Gates in list order.
    #[must_use]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates (the cost metric).
    #[must_use]
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Index of the next gate after `index` that acts on qubit `qubit`: the
    /// DAG successor of gate `index` on that wire.
    ///
    /// Returns `None` if `index` is out of range or nothing later uses `qubit`.
    #[must_use]
    pub fn next_on_qubit(&self, index: usize, qubit: u32) -> Option<usize> {
        if index >= self.gates.len() {
            return None;
        }
        self.gates[index + 1..]
            .iter()
            .position(|g| g.touches(qubit))
            .map(|offset| index + 1 + offset)
    }

    /// Positions strictly between `index` and `end` that depend on gate
    /// `index` through the DAG, in list order.
    ///
    /// A gate depends on `index` when it touches a wire already reached by
    /// gate `index` or by an earlier dependent gate.
    #[must_use]
    pub fn dependents_between(&self, index: usize, end: usize) -> Vec<usize> {
        let Some(gate) = self.gates.get(index) else {
            return Vec::new();
        };
        let mut reached = vec![false; self.qubit_count as usize];
        mark_wires(&mut reached, gate);
        let end = end.min(self.gates.len());
        let mut dependents = Vec::new();
        for k in index + 1..end {
            let between = &self.gates[k];
            let (a, b) = between.qubit_pair();
            let depends = [Some(a), b]
                .into_iter()
                .flatten()
                .any(|q| reached[q as usize]);
            if depends {
                mark_wires(&mut reached, between);
                dependents.push(k);
            }
        }
        dependents
    }

    /// Gate indices in canonical topological order of the gate DAG.
    #[must_use]
    pub fn canonical_order(&self) -> Vec<usize> {
        let n = self.gates.len();
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut in_degree = vec![0usize; n];
        let mut last_on_qubit: Vec<Option<usize>> = vec![None; self.qubit_count as usize];

        for (i, gate) in self.gates.iter().enumerate() {
            let (a, b) = gate.qubit_pair();
            let mut preds: Vec<usize> = [Some(a), b]
                .into_iter()
                .flatten()
                .filter_map(|q| last_on_qubit[q as usize])
                .collect();
            preds.dedup();
            for p in preds {
                successors[p].push(i);
                in_degree[i] += 1;
            }
            last_on_qubit[a as usize] = Some(i);
            if let Some(b) = b {
                last_on_qubit[b as usize] = Some(i);
            }
        }

        let mut ready: BTreeSet<(Gate, usize)> = (0..n)
            .filter(|&i| in_degree[i] == 0)
            .map(|i| (self.gates[i], i))
            .collect();
        let mut order = Vec::with_capacity(n);
        while let Some((_, i)) = ready.pop_first() {
            order.push(i);
            for &s in &successors[i] {
                in_degree[s] -= 1;
                if in_degree[s] == 0 {
                    ready.insert((self.gates[s], s));
                }
            }
        }
        order
    }

    /// Identity bytes: register width, then every gate in canonical
    /// topological order.
    #[must_use]
    pub fn identity_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + self.gates.len() * 9);
        buf.extend_from_slice(&self.qubit_count.to_le_bytes());
        for i in self.canonical_order() {
            self.gates[i].write_identity(&mut buf);
        }
        buf
    }
}

fn mark_wires(reached: &mut [bool], gate: &Gate) {
    let (a, b) = gate.qubit_pair();
    reached[a as usize] = true;
    if let Some(b) = b {
        reached[b as usize] = true;
    }
}
