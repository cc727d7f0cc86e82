//! Proof module: canonical hashing and circuit fingerprints.
//!
//! Depends on `carrier`. Nothing depends on `proof` within the kernel.

pub mod fingerprint;
pub mod hash;
