//! Cache Store Module
//!
//! Main cache engine combining a key index with the recency list and byte
//! size accounting.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, CacheValue, LruList, SlotId};

/// Hook invoked with the key and value of every evicted entry.
pub type EvictionCallback<V> = Box<dyn FnMut(String, V) + Send>;

// == LRU Cache ==
/// Byte-size bounded LRU cache.
///
/// Each entry is charged `key.len() + value.size()` bytes. When an insert or
/// update pushes the total above the capacity, least recently used entries
/// are evicted until it fits again. A capacity of 0 disables eviction.
///
/// The cache is not synchronized. Wrap it in a lock to share it between
/// threads; the eviction callback must be `Send` so the cache can move with it.
pub struct LruCache<V> {
    /// Entries in recency order, sole owner of keys and values
    entries: LruList<CacheEntry<V>>,
    /// Key to list slot
    index: HashMap<String, SlotId>,
    /// Sum of the charges of all current entries
    size: u128,
    /// Byte budget, 0 = unbounded
    capacity: usize,
    on_evicted: Option<EvictionCallback<V>>,
    stats: CacheStats,
}

impl<V: CacheValue> LruCache<V> {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` bytes.
    ///
    /// # Arguments
    /// * `capacity` - Byte budget, 0 for an unbounded cache
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruList::new(),
            index: HashMap::new(),
            size: 0,
            capacity,
            on_evicted: None,
            stats: CacheStats::new(),
        }
    }

    /// Creates an empty cache that reports evictions to `on_evicted`.
    ///
    /// The callback runs synchronously inside `add` or `remove_oldest`,
    /// after the evicted entry has been fully detached. It receives
    /// ownership of the evicted key and value.
    pub fn with_eviction_callback<F>(capacity: usize, on_evicted: F) -> Self
    where
        F: FnMut(String, V) + Send + 'static,
    {
        let mut cache = Self::new(capacity);
        cache.on_evicted = Some(Box::new(on_evicted));
        cache
    }

    // == Get ==
    /// Looks up a key and marks it as most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        match self.index.get(key) {
            Some(&id) => {
                self.entries.move_to_front(id);
                self.stats.record_hit();
                self.entries.get(id).map(|entry| &entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Looks up a key without changing its recency or the statistics.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    // == Add ==
    /// Inserts or updates a key, then evicts until the cache fits.
    ///
    /// An existing key keeps its entry: it is moved to the front and its
    /// value replaced, adjusting the size by the difference in charge.
    ///
    /// A single entry larger than the whole capacity is still inserted and
    /// then evicted before this returns, firing the eviction callback with
    /// the value just added.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();

        match self.index.get(key.as_str()) {
            Some(&id) => {
                self.entries.move_to_front(id);
                if let Some(entry) = self.entries.get_mut(id) {
                    let (_, old_charge) = entry.replace(value);
                    self.size = self.size - old_charge + entry.charge;
                }
            }
            None => {
                let entry = CacheEntry::new(key.clone(), value);
                let charge = entry.charge;
                if self.capacity != 0 && charge > self.capacity as u128 {
                    debug!(
                        key = %key,
                        charge,
                        capacity = self.capacity,
                        "entry exceeds cache capacity and will be evicted"
                    );
                }

                let id = self.entries.push_front(entry);
                self.index.insert(key, id);
                self.size += charge;
            }
        }

        while self.capacity != 0 && self.size > self.capacity as u128 {
            if !self.remove_oldest() {
                break;
            }
        }
    }

    // == Remove Oldest ==
    /// Evicts the least recently used entry.
    ///
    /// Returns false if the cache was empty. The eviction callback, if any,
    /// runs after the entry has left both the list and the index.
    pub fn remove_oldest(&mut self) -> bool {
        let Some(entry) = self.entries.pop_back() else {
            return false;
        };

        self.index.remove(entry.key.as_str());
        self.size -= entry.charge;
        self.stats.record_eviction();
        trace!(
            key = %entry.key,
            charge = entry.charge,
            size = self.size,
            "evicted least recently used entry"
        );

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(entry.key, entry.value);
        }
        true
    }

    // == Peek Oldest ==
    /// Returns the next eviction candidate.
    pub fn peek_oldest(&self) -> Option<(&str, &V)> {
        self.entries
            .back()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    // == Remove ==
    /// Deletes a key and returns its value.
    ///
    /// This is not an eviction: the callback is not invoked.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self.entries.remove(id)?;
        self.size -= entry.charge;
        Some(entry.value)
    }

    // == Clear ==
    /// Drops every entry without invoking the callback.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.size = 0;
    }

    // == Contains ==
    /// Checks membership without touching recency.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Keys ==
    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    // == Length ==
    /// Returns the number of entries (not bytes).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the bytes currently charged against the capacity.
    ///
    /// The running total is kept exactly; only the reported value is capped
    /// at `usize::MAX`, which an unbounded cache holding values with absurd
    /// reported sizes can exceed.
    pub fn size(&self) -> usize {
        usize::try_from(self.size).unwrap_or(usize::MAX)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_occupancy(self.len(), self.size(), self.capacity);
        stats
    }
}

impl<V> fmt::Debug for LruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.entries.len())
            .field("size", &self.size)
            .field("capacity", &self.capacity)
            .field("has_eviction_callback", &self.on_evicted.is_some())
            .finish()
    }
}
