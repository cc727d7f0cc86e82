//! Candidate corpus and seeded sampling.
//!
//! The corpus is a JSON object `{ "<id>": ["<qasm text>", <gate count>], ... }`.
//! Entries are kept in id order so a sample depends only on the seed and the
//! set of ids, never on file layout.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

use xferdepth_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_CORPUS_ENTRY};

use crate::error::DriverError;

/// One corpus entry: the circuit text and its recorded gate count.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, u64)")]
pub struct CorpusEntry {
    pub qasm: String,
    pub gate_count: u64,
}

impl From<(String, u64)> for CorpusEntry {
    fn from((qasm, gate_count): (String, u64)) -> Self {
        Self { qasm, gate_count }
    }
}

impl CorpusEntry {
    /// Content hash of the QASM text, as stored (not canonicalized).
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        canonical_hash(DOMAIN_CORPUS_ENTRY, self.qasm.as_bytes())
    }
}

/// A sampled entry, tagged with its corpus id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledEntry {
    pub id: String,
    pub entry: CorpusEntry,
}

/// Id-ordered corpus.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: BTreeMap<String, CorpusEntry>,
}

impl Corpus {
    /// Read a corpus file.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::InputData`] if the file is missing or does not
    /// have the `id -> [qasm, gate_count]` shape.
    pub fn load(path: &Path) -> Result<Self, DriverError> {
        let text = fs::read_to_string(path).map_err(|e| DriverError::input(path, e))?;
        let entries = serde_json::from_str(&text).map_err(|e| DriverError::input(path, e))?;
        Ok(Self { entries })
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, CorpusEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CorpusEntry> {
        self.entries.get(id)
    }

    /// Ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Draw `amount` distinct entries, reproducibly for a given `seed`.
    ///
    /// The returned order is the draw order; position `k` is global sample
    /// index `k`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::InputData`] (attributed to `source`) if the
    /// corpus holds fewer than `amount` entries.
    pub fn sample(
        &self,
        amount: usize,
        seed: u64,
        source: &Path,
    ) -> Result<Vec<SampledEntry>, DriverError> {
        if amount > self.len() {
            return Err(DriverError::input(
                source,
                format!("corpus has {} entries, sample needs {amount}", self.len()),
            ));
        }
        let by_position: Vec<(&String, &CorpusEntry)> = self.entries.iter().collect();
        Ok(sample_indices(self.len(), amount, seed)
            .into_iter()
            .map(|i| {
                let (id, entry) = by_position[i];
                SampledEntry {
                    id: id.clone(),
                    entry: entry.clone(),
                }
            })
            .collect())
    }
}

/// `amount` distinct indices in `0..population`, drawn with a ChaCha8
/// generator seeded from `seed`.
///
/// # Panics
///
/// Panics if `amount > population`.
#[must_use]
pub fn sample_indices(population: usize, amount: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    index::sample(&mut rng, population, amount).into_vec()
}
