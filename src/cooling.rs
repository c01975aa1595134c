//! Cooling schedules.
//!
//! A schedule maps `(iteration, iteration_budget)` to a temperature that
//! starts at 1 and trends toward 0. Both built-ins reach exactly 0.01 when
//! the iteration count equals the budget.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Temperature reached at `iteration == budget` by the built-in schedules.
pub const FINAL_TEMPERATURE: f64 = 0.01;

/// Linear cooling: `1 - 0.99 * (iteration / budget)`.
///
/// Keeps falling past the budget and goes negative, which disables
/// probabilistic acceptance.
pub fn linear_temperature(iteration: f64, budget: f64) -> f64 {
    1.0 - (1.0 - FINAL_TEMPERATURE) * (iteration / budget)
}

/// Exponential cooling: `0.01 ^ (iteration / budget)`.
///
/// Approaches 0 asymptotically and never goes negative.
pub fn exponential_temperature(iteration: f64, budget: f64) -> f64 {
    FINAL_TEMPERATURE.powf(iteration / budget)
}

/// Signature of a caller-supplied schedule.
pub type CoolingFn = dyn Fn(f64, f64) -> f64 + Send + Sync;

/// Cooling schedule used by [`AnnealingSolver`](crate::AnnealingSolver).
///
/// # Examples
///
/// ```
/// use u_anneal::CoolingSchedule;
///
/// let halfway = CoolingSchedule::Linear.temperature(50.0, 100.0);
/// assert!((halfway - 0.505).abs() < 1e-12);
///
/// // Stepwise: full temperature for the first half, then frozen.
/// let step = CoolingSchedule::custom(|i, b| if i < b / 2.0 { 1.0 } else { 0.0 });
/// assert_eq!(step.temperature(60.0, 100.0), 0.0);
/// ```
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoolingSchedule {
    /// [`exponential_temperature`].
    #[default]
    Exponential,

    /// [`linear_temperature`].
    Linear,

    /// Any pure function of `(iteration, budget)`.
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(Arc<CoolingFn>),
}

impl CoolingSchedule {
    /// Wraps a closure as a custom schedule.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        CoolingSchedule::Custom(Arc::new(f))
    }

    /// Evaluates the schedule.
    pub fn temperature(&self, iteration: f64, budget: f64) -> f64 {
        match self {
            CoolingSchedule::Exponential => exponential_temperature(iteration, budget),
            CoolingSchedule::Linear => linear_temperature(iteration, budget),
            CoolingSchedule::Custom(f) => f(iteration, budget),
        }
    }
}

impl fmt::Debug for CoolingSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoolingSchedule::Exponential => f.write_str("Exponential"),
            CoolingSchedule::Linear => f.write_str("Linear"),
            CoolingSchedule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
