//! Sized LRU - A byte-size bounded least-recently-used cache
//!
//! Bounds the total bytes held rather than the entry count and reports
//! every eviction through an optional callback.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStats, CacheValue, LruCache};
pub use config::Config;
pub use error::{CacheError, Result};
