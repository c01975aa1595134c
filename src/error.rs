//! Error types for u-anneal.

use thiserror::Error;

/// Result type alias for configuration checks.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Problems reported by [`SolverConfig::validate`](crate::SolverConfig::validate).
///
/// The solver itself never returns these: it runs with whatever it was
/// given. Validation is for callers that want to catch bad tuning early.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Iteration budget is zero, negative or NaN.
    #[error("iteration budget must be positive, got {0}")]
    NonPositiveBudget(f64),

    /// Iteration budget is infinite.
    #[error("iteration budget must be finite, got {0}")]
    NonFiniteBudget(f64),

    /// Scale constant is negative or not finite.
    #[error("scale constant k must be finite and non-negative, got {0}")]
    InvalidScale(f64),
}
