//! Gate lists that implement the same DAG share a fingerprint, so they must
//! also share every search answer.
//!
//! Two checks: every topological ordering of a few hand-picked circuits
//! offers the same set of child DAGs and the same minimal depth; and every
//! small circuit over a fixed alphabet agrees on depth with every other
//! circuit of the same fingerprint.

use std::collections::{BTreeMap, BTreeSet};

use xferdepth_harness::worlds::circuit_xfer::CircuitXfer;
use xferdepth_kernel::carrier::circuit::Circuit;
use xferdepth_kernel::carrier::gate::Gate;
use xferdepth_kernel::carrier::qasm::parse_qasm;
use xferdepth_kernel::proof::fingerprint::circuit_fingerprint;
use xferdepth_search::contract::TransitionOracle;
use xferdepth_search::search::find_min_improving_depth;

const MAX_DEPTH: u32 = 6;

fn depth(circuit: &Circuit) -> Option<u32> {
    find_min_improving_depth(&CircuitXfer, circuit.clone(), MAX_DEPTH).unwrap()
}

/// Fingerprints of every circuit one rewrite away.
fn child_fingerprints(circuit: &Circuit) -> BTreeSet<String> {
    let mut children = BTreeSet::new();
    for point in CircuitXfer.mutable_points(circuit).unwrap() {
        for rule in CircuitXfer.applicable_rules(circuit, &point).unwrap() {
            let child = CircuitXfer.apply(circuit, &point, &rule).unwrap();
            children.insert(circuit_fingerprint(&child).as_str().to_string());
        }
    }
    children
}

/// Every list order of `circuit`'s gates that respects per-wire order.
fn topological_orderings(circuit: &Circuit) -> Vec<Circuit> {
    fn extend(remaining: &[Gate], prefix: &mut Vec<Gate>, qubits: u32, out: &mut Vec<Circuit>) {
        if remaining.is_empty() {
            out.push(Circuit::new(qubits, prefix.clone()).unwrap());
            return;
        }
        for k in 0..remaining.len() {
            let ready = remaining[..k].iter().all(|g| !g.shares_qubit(&remaining[k]));
            if !ready {
                continue;
            }
            let mut rest = remaining.to_vec();
            let gate = rest.remove(k);
            prefix.push(gate);
            extend(&rest, prefix, qubits, out);
            prefix.pop();
        }
    }
    let mut out = Vec::new();
    extend(circuit.gates(), &mut Vec::new(), circuit.qubit_count(), &mut out);
    out
}

fn assert_orderings_agree(qasm: &str) -> Option<u32> {
    let circuit = parse_qasm(qasm).unwrap();
    let expected_fp = circuit_fingerprint(&circuit);
    let expected_children = child_fingerprints(&circuit);
    let expected_depth = depth(&circuit);

    let orderings = topological_orderings(&circuit);
    assert!(orderings.len() > 1, "{qasm} has a single ordering");
    for ordering in &orderings {
        assert_eq!(circuit_fingerprint(ordering), expected_fp, "{ordering:?}");
        assert_eq!(child_fingerprints(ordering), expected_children, "{ordering:?}");
        assert_eq!(depth(ordering), expected_depth, "{ordering:?}");
    }
    expected_depth
}

#[test]
fn listing_order_after_cx_does_not_change_depth() {
    let a = "qreg q[2];\ntdg q[0];\nh q[1];\ncx q[0],q[1];\nt q[0];\nh q[1];\n";
    let b = "qreg q[2];\ntdg q[0];\nh q[1];\ncx q[0],q[1];\nh q[1];\nt q[0];\n";
    let (ca, cb) = (parse_qasm(a).unwrap(), parse_qasm(b).unwrap());
    assert_eq!(circuit_fingerprint(&ca), circuit_fingerprint(&cb));
    assert_eq!(depth(&ca), Some(2));
    assert_eq!(depth(&cb), Some(2));
    assert_eq!(assert_orderings_agree(a), Some(2));
}

#[test]
fn every_ordering_offers_the_same_rewrites() {
    for qasm in [
        "qreg q[3];\nt q[0];\nh q[2];\ncx q[0],q[1];\nh q[1];\ncx q[0],q[2];\ntdg q[0];\n",
        "qreg q[3];\ncx q[0],q[1];\nt q[2];\ncx q[1],q[2];\ncx q[0],q[2];\ntdg q[2];\nh q[0];\n",
        "qreg q[3];\nh q[0];\nh q[1];\nh q[2];\ncx q[0],q[1];\nh q[1];\nh q[0];\n",
        "qreg q[3];\ncx q[2],q[1];\nt q[0];\ncx q[0],q[1];\nh q[2];\ntdg q[0];\n",
    ] {
        assert_orderings_agree(qasm);
    }
}

fn alphabet(qubits: u32) -> Vec<Gate> {
    let mut gates = Vec::new();
    for q in 0..qubits {
        gates.extend([Gate::H(q), Gate::T(q), Gate::Tdg(q)]);
    }
    for control in 0..qubits {
        for target in 0..qubits {
            if control != target {
                gates.push(Gate::Cx { control, target });
            }
        }
    }
    gates
}

/// All gate lists of exactly `len` gates over `alphabet`.
fn all_lists(alphabet: &[Gate], len: usize) -> Vec<Vec<Gate>> {
    let mut lists = vec![Vec::new()];
    for _ in 0..len {
        lists = lists
            .into_iter()
            .flat_map(|list| {
                alphabet.iter().map(move |&gate| {
                    let mut next = list.clone();
                    next.push(gate);
                    next
                })
            })
            .collect();
    }
    lists
}

fn assert_fingerprint_classes_agree(qubits: u32, max_len: usize) {
    let gates = alphabet(qubits);
    let mut classes: BTreeMap<String, (Vec<Gate>, Option<u32>)> = BTreeMap::new();
    let mut merged = 0usize;
    for len in 1..=max_len {
        for list in all_lists(&gates, len) {
            let circuit = Circuit::new(qubits, list.clone()).unwrap();
            let fp = circuit_fingerprint(&circuit).as_str().to_string();
            let found = depth(&circuit);
            match classes.get(&fp) {
                Some((first, expected)) => {
                    merged += 1;
                    assert_eq!(found, *expected, "{list:?} vs {first:?}");
                }
                None => {
                    classes.insert(fp, (list, found));
                }
            }
        }
    }
    assert!(merged > 0, "no two lists shared a fingerprint");
}

#[test]
fn small_three_qubit_circuits_agree_within_fingerprint_class() {
    assert_fingerprint_classes_agree(3, 3);
}

#[test]
fn four_gate_two_qubit_circuits_agree_within_fingerprint_class() {
    assert_fingerprint_classes_agree(2, 4);
}
