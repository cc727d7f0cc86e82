//! xferdepth kernel: the circuit carrier and its rewrite rules.
//!
//! # API Surface
//!
//! - [`carrier::qasm::parse_qasm`] -- parse a QASM subset into a [`carrier::circuit::Circuit`]
//! - [`operators::rule::applicable_rules`] -- list the rules applicable at a gate position
//! - [`operators::apply::apply`] -- apply a rule at a gate position, producing a new circuit
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 content hash
//!
//! # Module Dependency Direction
//!
//! `operators` → `carrier` ← `proof`
//!
//! One-way only. No cycles.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod operators;
pub mod proof;
