//! xferdepth search: bounded breadth-first search for the minimum number of
//! rewrites that lowers a state's cost.
//!
//! This crate knows nothing about circuits. States, their hashes, costs,
//! mutable points and rewrite rules all come from a [`TransitionOracle`]
//! supplied by the caller.
//!
//! # Crate dependency graph
//!
//! ```text
//! xferdepth_kernel      xferdepth_search  ←  xferdepth_harness
//! (circuit carrier)     (oracle, BFS)        (circuit oracle, driver)
//! ```
//!
//! # Key types
//!
//! - [`TransitionOracle`] -- the five-operation capability the engine consumes
//! - [`BfsFrontier`] -- FIFO queue plus first-writer-wins visited map
//! - [`SearchPolicy`] -- depth bound, progress cadence, deadline
//! - [`SearchReport`] -- outcome plus expansion statistics
//! - [`ExplicitGraphOracle`] -- table-backed oracle over an explicit state graph
//!
//! [`TransitionOracle`]: contract::TransitionOracle
//! [`BfsFrontier`]: frontier::BfsFrontier
//! [`SearchPolicy`]: policy::SearchPolicy
//! [`SearchReport`]: search::SearchReport
//! [`ExplicitGraphOracle`]: graph_oracle::ExplicitGraphOracle

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod graph_oracle;
pub mod policy;
pub mod search;
