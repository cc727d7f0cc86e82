//! Breadth-first frontier with a first-writer-wins visited map.
//!
//! The visited map is the single source of truth for "has this state been
//! seen, and how far away is it". Once a fingerprint is recorded its depth
//! never changes. The queue is strict FIFO, so states leave in the order
//! they were discovered.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// A queued state with the depth at which it was discovered.
#[derive(Debug, Clone)]
pub struct FrontierEntry<S, F> {
    pub state: S,
    pub fingerprint: F,
    pub depth: u32,
}

/// Result of offering a state to the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    /// First sighting; the state was recorded at `depth` and enqueued.
    New { depth: u32 },
    /// Already recorded at `depth`; the offered state was dropped.
    Seen { depth: u32 },
}

impl Discovery {
    /// The depth recorded in the visited map for this fingerprint.
    #[must_use]
    pub fn depth(self) -> u32 {
        match self {
            Self::New { depth } | Self::Seen { depth } => depth,
        }
    }

    #[must_use]
    pub fn is_new(self) -> bool {
        matches!(self, Self::New { .. })
    }
}

/// FIFO frontier manager.
///
/// Maintains:
/// - A `VecDeque` of entries awaiting expansion
/// - A `HashMap` from fingerprint to first-discovery depth
pub struct BfsFrontier<S, F> {
    queue: VecDeque<FrontierEntry<S, F>>,
    visited: HashMap<F, u32>,
    high_water: u64,
}

impl<S, F: Eq + Hash + Clone> BfsFrontier<S, F> {
    /// Create an empty frontier with room for `capacity` states.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            visited: HashMap::with_capacity(capacity),
            high_water: 0,
        }
    }

    /// Offer a state discovered at `depth`.
    ///
    /// Only the first offer of a fingerprint is recorded and enqueued; later
    /// offers observe the existing depth and are dropped.
    pub fn discover(&mut self, state: S, fingerprint: F, depth: u32) -> Discovery {
        if let Some(&existing) = self.visited.get(&fingerprint) {
            return Discovery::Seen { depth: existing };
        }
        self.visited.insert(fingerprint.clone(), depth);
        self.queue.push_back(FrontierEntry {
            state,
            fingerprint,
            depth,
        });
        let size = self.queue.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        Discovery::New { depth }
    }

    /// Dequeue the oldest entry.
    #[must_use]
    pub fn pop(&mut self) -> Option<FrontierEntry<S, F>> {
        self.queue.pop_front()
    }

    /// Recorded depth of a fingerprint, if it has been seen.
    #[must_use]
    pub fn depth_of(&self, fingerprint: &F) -> Option<u32> {
        self.visited.get(fingerprint).copied()
    }

    /// Entries awaiting expansion.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of distinct fingerprints recorded.
    #[must_use]
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// High-water mark of queue length.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
