//! Cache Entry Module
//!
//! Defines the value size capability and the entry stored in the recency list.

use std::sync::Arc;

// == Cache Value ==
/// A payload that can be stored in an [`LruCache`](crate::cache::LruCache).
///
/// The reported size is charged against the cache capacity together with
/// the key length.
pub trait CacheValue {
    /// Returns the number of bytes this value occupies.
    fn size(&self) -> usize;
}

impl CacheValue for str {
    fn size(&self) -> usize {
        self.len()
    }
}

impl CacheValue for [u8] {
    fn size(&self) -> usize {
        self.len()
    }
}

impl CacheValue for String {
    fn size(&self) -> usize {
        self.len()
    }
}

impl CacheValue for Vec<u8> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl<T: CacheValue + ?Sized> CacheValue for &T {
    fn size(&self) -> usize {
        (**self).size()
    }
}

impl<T: CacheValue + ?Sized> CacheValue for Box<T> {
    fn size(&self) -> usize {
        (**self).size()
    }
}

impl<T: CacheValue + ?Sized> CacheValue for Arc<T> {
    fn size(&self) -> usize {
        (**self).size()
    }
}

// == Cache Entry ==
/// One key-value pair held by the recency list.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The key, counted toward the entry charge
    pub key: String,
    /// The stored value
    pub value: V,
    /// Bytes accounted for this entry when it was last written.
    ///
    /// Widened so `key.len() + value.size()` is exact for any reported size.
    pub charge: u128,
}

impl<V: CacheValue> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry and computes its charge.
    pub fn new(key: String, value: V) -> Self {
        let charge = charge_for(&key, &value);
        Self { key, value, charge }
    }

    // == Replace ==
    /// Swaps in a new value, returning the previous value and charge.
    pub fn replace(&mut self, value: V) -> (V, u128) {
        let old_charge = self.charge;
        self.charge = charge_for(&self.key, &value);
        let old_value = std::mem::replace(&mut self.value, value);
        (old_value, old_charge)
    }
}

// == Utility Functions ==
/// Returns the byte charge for a key-value pair.
pub fn charge_for<V: CacheValue>(key: &str, value: &V) -> u128 {
    key.len() as u128 + value.size() as u128
}
