//! Carrier module: gates, circuits, and the QASM boundary.
//!
//! This is the foundational layer. No other kernel module is imported here.

pub mod circuit;
pub mod gate;
pub mod qasm;
