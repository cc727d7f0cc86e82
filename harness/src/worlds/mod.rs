//! Oracle implementations the runner can search over.

pub mod circuit_xfer;
