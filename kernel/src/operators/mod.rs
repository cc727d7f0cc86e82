//! Operators module: rewrite rule identifiers and the `apply()` entry point.
//!
//! Depends on `carrier`. Does not import from `proof`.

pub mod apply;
pub mod rule;
