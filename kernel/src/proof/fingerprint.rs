//! Circuit fingerprints: the content hash used as state identity.

use crate::carrier::circuit::Circuit;
use crate::proof::hash::{canonical_hash, ContentHash, DOMAIN_CIRCUIT_IDENTITY};

/// `canonical_hash(DOMAIN_CIRCUIT_IDENTITY, circuit.identity_bytes())`.
#[must_use]
pub fn circuit_fingerprint(circuit: &Circuit) -> ContentHash {
    canonical_hash(DOMAIN_CIRCUIT_IDENTITY, &circuit.identity_bytes())
}
