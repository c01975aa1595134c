//! Domain-agnostic simulated annealing engine.
//!
//! The caller describes a problem through [`AnnealingMethods`]: how to
//! propose a move (and report the cost change it would cause) and how to
//! apply one. [`AnnealingSolver`] owns everything else:
//!
//! - **Acceptance**: improving and neutral moves are always taken; worsening
//!   moves are taken with probability `exp(-k * delta / T)`.
//! - **Cooling**: `T` follows a [`CoolingSchedule`] over a planned iteration
//!   budget, exponential by default.
//! - **Scale learning**: when no scale constant `k` is configured, the solver
//!   estimates one from the deltas seen during the first 40% of the budget,
//!   aiming for a 70% acceptance rate at full temperature.
//! - **Batching and abort**: progress is kept between [`run`] calls, and an
//!   [`AbortHandle`] stops a run after the iteration in flight.
//!
//! # Example
//!
//! ```
//! use u_anneal::{AnnealingSolver, Proposal, SolverConfig};
//!
//! // Minimise |x| over the integers with unit steps.
//! let config = SolverConfig::default().with_iteration_budget(2_000.0).with_seed(7);
//! let mut solver = AnnealingSolver::with_config(
//!     u_anneal::FnMethods::new(
//!         |x: &i64, iter| {
//!             let step: i64 = if iter % 2 == 0 { 1 } else { -1 };
//!             Proposal::new(step, ((x + step).abs() - x.abs()) as f64)
//!         },
//!         |x: i64, step: i64| x + step,
//!     ),
//!     config,
//! );
//!
//! let mut x = 25;
//! for _ in 0..10 {
//!     x = solver.run(x, 200).state;
//! }
//! assert!(x.abs() < 25);
//! ```
//!
//! The solver installs no `tracing` subscriber; batch summaries are emitted
//! at `debug` level for the embedding application to collect.
//!
//! [`run`]: AnnealingSolver::run

mod config;
mod cooling;
mod error;
mod solver;
mod types;

pub use config::{SolverConfig, DEFAULT_ITERATION_BUDGET};
pub use cooling::{
    exponential_temperature, linear_temperature, CoolingFn, CoolingSchedule, FINAL_TEMPERATURE,
};
pub use error::{ConfigError, Result};
pub use solver::{AbortHandle, AnnealingSolver, RunOutcome, DEFAULT_RUN_ITERATIONS};
pub use types::{AnnealingMethods, FnMethods, Proposal};
