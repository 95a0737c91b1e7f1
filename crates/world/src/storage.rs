use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;

use crate::Chunk;
use voxkernel_core::ChunkPos;

/// Chunk arena keyed by chunk position.
pub type ChunkCache = FifoCache<ChunkPos, Chunk>;

/// Bounded map that evicts strictly by insertion order.
///
/// Backed by an [`LruCache`] that is only ever read through `peek`, so a hit
/// never refreshes an entry's position: the entry inserted earliest is always
/// the next one evicted, however recently it was read.
pub struct FifoCache<K: Hash + Eq, V> {
    entries: LruCache<K, V>,
}

impl<K: Hash + Eq + Copy, V> FifoCache<K, V> {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
        }
    }

    /// Maximum number of resident entries.
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `key` is resident.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    /// Look up an entry without touching insertion order.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.peek(key)
    }

    /// Mutable lookup without touching insertion order.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.peek_mut(key)
    }

    /// Insert a new entry, evicting the oldest one if at capacity.
    ///
    /// Replacing a resident key keeps its original slot. Returns the evicted
    /// entry, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(slot) = self.entries.peek_mut(&key) {
            *slot = value;
            return None;
        }
        self.entries.push(key, value)
    }

    /// Remove an entry.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.pop(key)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Resident keys from oldest to newest insertion.
    pub fn keys_oldest_first(&self) -> Vec<K> {
        let mut keys: Vec<K> = self.entries.iter().map(|(k, _)| *k).collect();
        keys.reverse();
        keys
    }
}
