//! xferdepth harness: batch verification of precomputed rewrite distances.
//!
//! The harness merges sharded depth labels, samples candidate circuits from a
//! corpus with a seeded generator, re-derives each circuit's minimal
//! improving depth through the search engine, and writes every verified
//! circuit to `step<depth>.qasm`.
//!
//! The harness does NOT implement search logic; it delegates to
//! `xferdepth_search`. The circuit oracle lives in [`worlds`].

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod artifacts;
pub mod config;
pub mod corpus;
pub mod error;
pub mod runner;
pub mod shards;
pub mod worlds;
