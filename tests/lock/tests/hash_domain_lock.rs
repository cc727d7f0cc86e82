//! Hash domain and fingerprint lock tests.
//!
//! Proves:
//! 1. Domain prefixes are unique, null-terminated and follow
//!    `XFERDEPTH::<NAME>::V1\0`
//! 2. Circuit fingerprints are stable byte-for-byte (golden digests)
//! 3. Fingerprints identify circuits up to reordering of independent gates

use std::collections::BTreeSet;

use xferdepth_kernel::carrier::circuit::Circuit;
use xferdepth_kernel::carrier::gate::Gate;
use xferdepth_kernel::carrier::qasm::parse_qasm;
use xferdepth_kernel::proof::fingerprint::circuit_fingerprint;
use xferdepth_kernel::proof::hash::{canonical_hash, ALL_DOMAINS, DOMAIN_CIRCUIT_IDENTITY};

#[test]
fn domains_unique_and_null_terminated() {
    let mut seen = BTreeSet::new();
    for domain in ALL_DOMAINS {
        assert!(seen.insert(domain), "duplicate domain {domain:?}");
        assert!(domain.ends_with(&[0]), "{domain:?} is not null-terminated");
    }
}

#[test]
fn domains_follow_naming_convention() {
    for domain in ALL_DOMAINS {
        let text = std::str::from_utf8(&domain[..domain.len() - 1]).expect("ASCII domain");
        assert!(text.starts_with("XFERDEPTH::"), "{text}");
        assert!(text.ends_with("::V1"), "{text}");
        assert_eq!(text.matches("::").count(), 2, "{text}");
    }
}

// Golden values: sha256(domain || u32le(qubits) || (tag || u32le(qubit)...)*).

#[test]
fn golden_fingerprint_single_qubit() {
    let circuit = parse_qasm("qreg q[1];\nh q[0];\nh q[0];\n").unwrap();
    assert_eq!(
        circuit_fingerprint(&circuit).as_str(),
        "sha256:9826b123615d9666c87987c25311a575f586f9fa24d0746f2b8f3649f29f971b"
    );
}

#[test]
fn golden_fingerprint_two_qubit() {
    let circuit = Circuit::new(
        2,
        vec![
            Gate::T(0),
            Gate::Cx {
                control: 0,
                target: 1,
            },
        ],
    )
    .unwrap();
    assert_eq!(
        circuit_fingerprint(&circuit).as_str(),
        "sha256:3595d997d6dc6823c28a476a2b4e1aba79aecdfdc0ef2bb04b18d4ac9efa8fb6"
    );
}

#[test]
fn fingerprint_routes_through_circuit_domain() {
    let circuit = parse_qasm("qreg q[2];\nt q[1];\nh q[0];\n").unwrap();
    assert_eq!(
        circuit_fingerprint(&circuit),
        canonical_hash(DOMAIN_CIRCUIT_IDENTITY, &circuit.identity_bytes())
    );
}

#[test]
fn independent_gate_order_is_one_state() {
    let a = parse_qasm("qreg q[3];\nh q[0];\nt q[1];\ncx q[1],q[2];\ntdg q[0];\n").unwrap();
    let b = parse_qasm("qreg q[3];\nt q[1];\nh q[0];\ntdg q[0];\ncx q[1],q[2];\n").unwrap();
    assert_eq!(circuit_fingerprint(&a), circuit_fingerprint(&b));
}

#[test]
fn dependent_gate_order_is_distinct() {
    let a = parse_qasm("qreg q[2];\nt q[0];\ncx q[0],q[1];\n").unwrap();
    let b = parse_qasm("qreg q[2];\ncx q[0],q[1];\nt q[0];\n").unwrap();
    assert_ne!(circuit_fingerprint(&a), circuit_fingerprint(&b));
}

#[test]
fn register_width_is_part_of_identity() {
    let narrow = parse_qasm("qreg q[1];\nh q[0];\n").unwrap();
    let wide = parse_qasm("qreg q[2];\nh q[0];\n").unwrap();
    assert_ne!(circuit_fingerprint(&narrow), circuit_fingerprint(&wide));
}
