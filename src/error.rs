//! Error types for the cache crate
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the crate.
///
/// Cache operations themselves never fail; errors come from loading
/// configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// An environment variable held a value that could not be parsed
    #[error("Invalid value {value:?} for {var}: {reason}")]
    InvalidConfig {
        var: String,
        value: String,
        reason: String,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
