//! Cache Module
//!
//! Provides a byte-size bounded cache with LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{charge_for, CacheEntry, CacheValue};
pub use lru::{Iter, LruList, SlotId};
pub use stats::CacheStats;
pub use store::{EvictionCallback, LruCache};
