//! Configuration Module
//!
//! Handles loading cache and demo driver settings from environment variables.

use std::env;
use std::str::FromStr;

use crate::error::{CacheError, Result};

/// Default cache budget: 1 MiB
pub const DEFAULT_CAPACITY_BYTES: usize = 1024 * 1024;
pub const DEFAULT_DEMO_ENTRIES: usize = 1000;
pub const DEFAULT_DEMO_VALUE_SIZE: usize = 1024;

/// Cache and demo driver configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Byte budget of the cache, 0 = unbounded
    pub capacity_bytes: usize,
    /// Number of synthetic entries the demo inserts
    pub demo_entries: usize,
    /// Size in bytes of each synthetic value
    pub demo_value_size: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY_BYTES` - Cache byte budget (default: 1048576)
    /// - `DEMO_ENTRIES` - Entries inserted by the demo (default: 1000)
    /// - `DEMO_VALUE_SIZE` - Bytes per demo value (default: 1024)
    ///
    /// Unset variables take their default; set but unparseable ones are an error.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            capacity_bytes: env_or("CACHE_CAPACITY_BYTES", DEFAULT_CAPACITY_BYTES)?,
            demo_entries: env_or("DEMO_ENTRIES", DEFAULT_DEMO_ENTRIES)?,
            demo_value_size: env_or("DEMO_VALUE_SIZE", DEFAULT_DEMO_VALUE_SIZE)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity_bytes: DEFAULT_CAPACITY_BYTES,
            demo_entries: DEFAULT_DEMO_ENTRIES,
            demo_value_size: DEFAULT_DEMO_VALUE_SIZE,
        }
    }
}

fn env_or<T>(var: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_or(var, env::var(var).ok(), default)
}

fn parse_or<T>(var: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|err: T::Err| CacheError::InvalidConfig {
                var: var.to_string(),
                value,
                reason: err.to_string(),
            }),
    }
}
