//! Shared circuit and graph builders for the xferdepth benchmark suites.

use xferdepth_kernel::carrier::circuit::Circuit;
use xferdepth_kernel::carrier::gate::Gate;
use xferdepth_search::graph_oracle::ExplicitGraphOracle;

/// `t q[0]`, then `k` CNOTs controlled on `q[0]`, then `tdg q[0]`.
///
/// The phase pair can only cancel after commuting past every CNOT, so the
/// minimal improving depth is `k + 1` and the reachable state space grows
/// with the CNOT orderings.
///
/// # Panics
///
/// Panics if `k` does not fit in a qubit index.
#[must_use]
pub fn phase_ladder(k: usize) -> Circuit {
    let width = u32::try_from(k + 1).expect("ladder width fits in u32");
    let mut gates = Vec::with_capacity(k + 2);
    gates.push(Gate::T(0));
    gates.extend((1..width).map(|target| Gate::Cx { control: 0, target }));
    gates.push(Gate::Tdg(0));
    Circuit::new(width, gates).expect("ladder gates address the register")
}

/// `n` gates cycling through `h`, `t` and `cx` across `width` qubits, with no
/// planted cancellation.
///
/// # Panics
///
/// Panics if `width < 2`.
#[must_use]
pub fn mixed_circuit(width: u32, n: usize) -> Circuit {
    assert!(width >= 2, "mixed circuit needs two qubits");
    let gates = (0..n)
        .map(|i| {
            let q = u32::try_from(i).unwrap_or(0) % width;
            match i % 3 {
                0 => Gate::H(q),
                1 => Gate::T(q),
                _ => Gate::Cx {
                    control: q,
                    target: (q + 1) % width,
                },
            }
        })
        .collect();
    Circuit::new(width, gates).expect("mixed gates address the register")
}

/// A `fanout`-ary tree of equal-cost states `depth` levels deep with one
/// cheaper leaf at the last position of the last level.
#[must_use]
pub fn wide_tree(fanout: u32, depth: u32) -> (ExplicitGraphOracle, usize) {
    let mut g = ExplicitGraphOracle::new();
    let root = g.add_state(100);
    let mut level = vec![root];
    for d in 1..=depth {
        let mut next = Vec::with_capacity(level.len() * fanout as usize);
        let last_parent = level.last().copied();
        for &parent in &level {
            for point in 0..fanout {
                let goal = d == depth && Some(parent) == last_parent && point + 1 == fanout;
                let cost = if goal { 99 } else { 100 };
                let child = g.add_state(cost);
                g.add_rewrite(parent, point, 0, child);
                next.push(child);
            }
        }
        level = next;
    }
    (g, root)
}
