//! Solver configuration.

use crate::cooling::CoolingSchedule;
use crate::error::{ConfigError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default planned iteration count.
pub const DEFAULT_ITERATION_BUDGET: f64 = 1e4;

/// Tuning for an [`AnnealingSolver`](crate::AnnealingSolver).
///
/// Configuration survives [`reset`](crate::AnnealingSolver::reset); it
/// describes how the search should behave, not how far it has got.
///
/// # Examples
///
/// ```
/// use u_anneal::{CoolingSchedule, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_iteration_budget(1e5)
///     .with_cooling(CoolingSchedule::Linear)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.k, 0.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Approximately how many iterations the caller plans to run.
    ///
    /// Only used as the denominator of the cooling schedule, so running
    /// past it is allowed.
    pub iteration_budget: f64,

    /// Scale constant applied to the error delta in the acceptance
    /// exponent. Depends on the magnitude of the caller's costs.
    ///
    /// `0` (the default) lets the solver learn a value from the first
    /// 40% of the budget.
    pub k: f64,

    /// Temperature schedule.
    pub cooling: CoolingSchedule,

    /// Seed for the acceptance draws. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            iteration_budget: DEFAULT_ITERATION_BUDGET,
            k: 0.0,
            cooling: CoolingSchedule::default(),
            seed: None,
        }
    }
}

impl SolverConfig {
    pub fn with_iteration_budget(mut self, budget: f64) -> Self {
        self.iteration_budget = budget;
        self
    }

    pub fn with_k(mut self, k: f64) -> Self {
        self.k = k;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the budget and scale constant are usable.
    ///
    /// Not called by the solver.
    pub fn validate(&self) -> Result<()> {
        let budget = self.iteration_budget;
        if budget.is_nan() || budget <= 0.0 {
            return Err(ConfigError::NonPositiveBudget(budget));
        }
        if budget.is_infinite() {
            return Err(ConfigError::NonFiniteBudget(budget));
        }
        if !self.k.is_finite() || self.k < 0.0 {
            return Err(ConfigError::InvalidScale(self.k));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert!((config.iteration_budget - 10_000.0).abs() < 1e-10);
        assert_eq!(config.k, 0.0);
        assert!(matches!(config.cooling, CoolingSchedule::Exponential));
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(SolverConfig::default().validate().is_ok());
        assert!(SolverConfig::default().with_k(2.5).validate().is_ok());
    }

    #[test]
    fn test_validate_bad_budget() {
        let config = SolverConfig::default().with_iteration_budget(0.0);
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveBudget(0.0)));

        let config = SolverConfig::default().with_iteration_budget(-5.0);
        assert!(config.validate().is_err());

        let config = SolverConfig::default().with_iteration_budget(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveBudget(_))
        ));

        let config = SolverConfig::default().with_iteration_budget(f64::INFINITY);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteBudget(_))
        ));
    }

    #[test]
    fn test_validate_bad_k() {
        let config = SolverConfig::default().with_k(-1.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidScale(-1.0)));

        let config = SolverConfig::default().with_k(f64::INFINITY);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_error_message() {
        let err = ConfigError::NonPositiveBudget(-1.0);
        assert_eq!(err.to_string(), "iteration budget must be positive, got -1");
    }
}
