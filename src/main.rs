//! Sized LRU - demonstration driver
//!
//! Fills a byte-bounded cache with synthetic values and prints the
//! resulting statistics as JSON.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sized_lru::{Config, LruCache};

/// Every `HOT_STRIDE`-th key is re-read after the fill phase.
const HOT_STRIDE: usize = 10;

/// Main entry point for the demo driver.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create a cache whose eviction callback tallies evicted bytes
/// 4. Insert the synthetic workload, then re-read a hot subset
/// 5. Print statistics as JSON on stdout
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sized_lru=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: capacity_bytes={}, demo_entries={}, demo_value_size={}",
        config.capacity_bytes, config.demo_entries, config.demo_value_size
    );

    let evicted_bytes = Arc::new(AtomicUsize::new(0));
    let tally = Arc::clone(&evicted_bytes);
    let mut cache =
        LruCache::with_eviction_callback(config.capacity_bytes, move |key, value: Vec<u8>| {
            tally.fetch_add(key.len() + value.len(), Ordering::Relaxed);
        });

    for i in 0..config.demo_entries {
        cache.add(
            format!("key:{i}"),
            vec![(i % 256) as u8; config.demo_value_size],
        );
    }
    info!(
        "Fill complete: {} entries resident, {} bytes evicted",
        cache.len(),
        evicted_bytes.load(Ordering::Relaxed)
    );

    let mut hot_hits = 0usize;
    for i in (0..config.demo_entries).step_by(HOT_STRIDE) {
        if cache.get(&format!("key:{i}")).is_some() {
            hot_hits += 1;
        }
    }
    info!(
        "Hot re-read: {} of {} keys still cached",
        hot_hits,
        config.demo_entries.div_ceil(HOT_STRIDE)
    );

    let stats = cache.stats();
    println!(
        "{}",
        serde_json::to_string_pretty(&stats).context("failed to serialize statistics")?
    );

    Ok(())
}
